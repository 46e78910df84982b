//! Chat services - Lista chat, messaggi, apertura chat diretta e invio

use crate::core::{AppError, AppState};
use crate::dtos::{
    ChatActionDTO, ChatDTO, ChatsQuery, ChatsResponseDTO, CreateMessageDTO, CreatedChatDTO,
    IdParam, MessageDTO, MessagesResponseDTO, SentMessageDTO, UserDTO,
};
use crate::entities::User;
use crate::repositories::{Create, Read};
use axum::{
    Extension,
    extract::{Json, Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use futures_util::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// GET /chats - `action=list_chats` (default) oppure `action=messages&chatId=..`
pub async fn chats_get(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    query: Result<Query<ChatsQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query?;
    match query.action.as_deref().unwrap_or("list_chats") {
        "list_chats" => Ok(list_chats(&state, &current_user).await?.into_response()),
        "messages" => Ok(get_chat_messages(&state, &current_user, query.chat_id)
            .await?
            .into_response()),
        other => {
            warn!("Unknown chats action: {}", other);
            Err(AppError::bad_request("Unknown action"))
        }
    }
}

/// POST /chats - `create_chat` o `send_message` secondo il campo `action`
pub async fn chats_post(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    payload: Result<Json<ChatActionDTO>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(action) = payload?;
    match action {
        ChatActionDTO::CreateChat { user_id } => {
            Ok(create_chat(&state, &current_user, user_id).await?.into_response())
        }
        ChatActionDTO::SendMessage { chat_id, body } => Ok(send_message(
            &state,
            &current_user,
            chat_id,
            body,
        )
        .await?
        .into_response()),
    }
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
async fn list_chats(
    state: &Arc<AppState>,
    current_user: &User,
) -> Result<Json<ChatsResponseDTO>, AppError> {
    debug!("Listing chats for user");
    // 1. Recuperare le chat di cui l'utente è membro (già ordinate dalla più recente)
    // 2. Per ogni chat caricare in parallelo partecipanti, ultimo messaggio e non letti
    // 3. Assemblare i ChatDTO mantenendo l'ordine
    let chats = state.chat.find_many_by_member(&current_user.id).await?;
    debug!("User is member of {} chats", chats.len());

    let now = Utc::now();
    let reader_id = current_user.id;
    let chats_dto: Vec<ChatDTO> = try_join_all(chats.into_iter().map(|chat| {
        let state = state.clone();
        async move {
            let participants = state.chat.find_participants(&chat.id).await?;
            let last_message = state.msg.find_last_by_chat_id(&chat.id).await?;
            let unread_count = state.msg.count_unread(&chat.id, &reader_id).await?;
            Ok::<_, sqlx::Error>(ChatDTO::assemble(
                chat,
                participants.into_iter().map(|u| UserDTO::at(u, now)).collect(),
                last_message.map(MessageDTO::from),
                unread_count,
            ))
        }
    }))
    .await?;

    info!("Successfully retrieved {} chats", chats_dto.len());
    Ok(Json(ChatsResponseDTO { chats: chats_dto }))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
async fn get_chat_messages(
    state: &AppState,
    current_user: &User,
    chat_id: Option<String>,
) -> Result<Json<MessagesResponseDTO>, AppError> {
    let chat_id = chat_id
        .as_deref()
        .and_then(|id| id.trim().parse::<i64>().ok())
        .ok_or_else(|| AppError::bad_request("chatId is required"))?;

    if !state.chat.is_member(&chat_id, &current_user.id).await? {
        warn!("User {} is not a member of chat {}", current_user.id, chat_id);
        return Err(AppError::forbidden("Access to this chat is denied"));
    }

    // la lista riflette lo stato prima della lettura, poi si marcano i messaggi ricevuti
    let messages = state.msg.find_many_by_chat_id(&chat_id).await?;
    let marked = state.msg.mark_read(&chat_id, &current_user.id, Utc::now()).await?;
    debug!("Marked {} messages as read in chat {}", marked, chat_id);

    Ok(Json(MessagesResponseDTO {
        messages: messages.into_iter().map(MessageDTO::from).collect(),
    }))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
async fn create_chat(
    state: &AppState,
    current_user: &User,
    other_user: Option<IdParam>,
) -> Result<(StatusCode, Json<CreatedChatDTO>), AppError> {
    // 1. Verificare che userId sia presente e che non coincida con l'utente corrente
    // 2. Verificare che l'altro utente esista
    // 3. Se esiste già una chat diretta tra i due, ritornarla con 200
    // 4. Altrimenti creare chat e membri in transazione e ritornare 201
    let other_id = other_user
        .as_ref()
        .and_then(IdParam::parse)
        .ok_or_else(|| AppError::bad_request("userId is required"))?;

    if other_id == current_user.id {
        return Err(AppError::bad_request("Cannot create a chat with yourself"));
    }

    if state.user.read(&other_id).await?.is_none() {
        return Err(AppError::not_found("User not found"));
    }

    if let Some(existing) = state
        .chat
        .find_direct_between(&current_user.id, &other_id)
        .await?
    {
        debug!("Direct chat {} already exists", existing.id);
        return Ok((
            StatusCode::OK,
            Json(CreatedChatDTO {
                chat_id: existing.id.to_string(),
            }),
        ));
    }

    let chat = state
        .chat
        .create_direct(&current_user.id, &other_id, Utc::now())
        .await?;
    info!("Direct chat {} created with user {}", chat.id, other_id);

    Ok((
        StatusCode::CREATED,
        Json(CreatedChatDTO {
            chat_id: chat.id.to_string(),
        }),
    ))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
async fn send_message(
    state: &AppState,
    current_user: &User,
    chat_id: Option<IdParam>,
    body: String,
) -> Result<(StatusCode, Json<SentMessageDTO>), AppError> {
    let body = body.trim().to_string();
    let chat_id = match chat_id.as_ref().and_then(IdParam::parse) {
        Some(id) if !body.is_empty() => id,
        _ => return Err(AppError::bad_request("chatId and body are required")),
    };

    if !state.chat.is_member(&chat_id, &current_user.id).await? {
        warn!("User {} is not a member of chat {}", current_user.id, chat_id);
        return Err(AppError::forbidden("Access to this chat is denied"));
    }

    let message = state
        .msg
        .create(&CreateMessageDTO {
            chat_id,
            sender_id: current_user.id,
            body,
            created_at: Utc::now(),
        })
        .await?;
    debug!("Message {} stored in chat {}", message.id, chat_id);

    Ok((
        StatusCode::CREATED,
        Json(SentMessageDTO {
            message: MessageDTO::from(message),
        }),
    ))
}
