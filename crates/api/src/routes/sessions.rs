//! Session Routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{ApiError, LiveSession, SharedState};
use fatigue_analysis::SessionAnalyzer;
use session_aggregate::{aggregate, AggregateError, SessionResult};
use storage::SessionRecord;

/// Response for session creation
#[derive(Debug, Serialize)]
pub struct CreatedSession {
    pub session_id: Uuid,
}

/// Open a new analysis session with fresh analyzer state
pub async fn create(
    State(state): State<SharedState>,
) -> Result<(StatusCode, Json<CreatedSession>), ApiError> {
    let mut state = state.write().await;
    let session_id = Uuid::new_v4();

    let analyzer = SessionAnalyzer::new(state.analyzer_config.clone());
    state.live.insert(
        session_id,
        LiveSession {
            analyzer,
            frames: Vec::new(),
            started_at: Utc::now(),
        },
    );

    info!(%session_id, "opened session");
    Ok((StatusCode::CREATED, Json(CreatedSession { session_id })))
}

/// Response for session completion
#[derive(Debug, Serialize)]
pub struct CompletedSession {
    pub session_id: Uuid,
    pub result: SessionResult,
}

/// Complete a session: aggregate its frames, persist, and return the
/// session result. A session with no analyzed frames is rejected and
/// stays open so the client can keep submitting frames.
pub async fn complete(
    State(state): State<SharedState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CompletedSession>, ApiError> {
    let mut state = state.write().await;

    let live = state
        .live
        .remove(&session_id)
        .ok_or_else(|| ApiError::not_found(format!("no open session {session_id}")))?;

    let result = match aggregate(&live.frames) {
        Ok(result) => result,
        Err(AggregateError::EmptyInput) => {
            // Rejecting must not destroy the analyzer state
            state.live.insert(session_id, live);
            return Err(ApiError::unprocessable(
                "session has no analyzed frames".to_string(),
            ));
        }
    };

    state
        .repository
        .insert_session(SessionRecord {
            session_id,
            completed_at: Utc::now(),
            result: result.clone(),
        })
        .map_err(|e| ApiError::internal(e.to_string()))?;

    info!(
        %session_id,
        frame_count = result.frame_count,
        fatigue_score = result.fatigue_score,
        "completed session"
    );
    Ok(Json(CompletedSession { session_id, result }))
}

/// Query parameters for the session list
#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

/// Response for the session list
#[derive(Debug, Serialize)]
pub struct SessionList {
    pub data: Vec<SessionRecord>,
    pub count: usize,
}

/// List recently completed sessions, newest first
pub async fn list(
    State(state): State<SharedState>,
    Query(params): Query<SessionQuery>,
) -> Result<Json<SessionList>, ApiError> {
    let state = state.read().await;
    let limit = params.limit.min(1000);

    let data = state
        .repository
        .recent_sessions(limit)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(SessionList {
        count: data.len(),
        data,
    }))
}

/// Fetch one completed session record
pub async fn get(
    State(state): State<SharedState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionRecord>, ApiError> {
    let state = state.read().await;
    state
        .repository
        .get_session(session_id)
        .map(Json)
        .map_err(|e| match e {
            storage::StorageError::NotFound => {
                ApiError::not_found(format!("no completed session {session_id}"))
            }
            other => ApiError::internal(other.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppState;
    use fatigue_analysis::AnalyzerConfig;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn test_state() -> SharedState {
        Arc::new(RwLock::new(AppState::new(AnalyzerConfig::default())))
    }

    #[tokio::test]
    async fn test_create_registers_live_session() {
        let state = test_state();
        let (status, Json(created)) = create(State(state.clone())).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert!(state.read().await.live.contains_key(&created.session_id));
    }

    #[tokio::test]
    async fn test_complete_unknown_session_is_404() {
        let err = complete(State(test_state()), Path(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_complete_empty_session_is_rejected() {
        let state = test_state();
        let (_, Json(created)) = create(State(state.clone())).await.unwrap();

        let err = complete(State(state.clone()), Path(created.session_id))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        // Nothing persisted for the rejected session
        assert_eq!(state.read().await.repository.session_count(), 0);
        // The session survives the rejection and stays open
        assert!(state.read().await.live.contains_key(&created.session_id));
    }

    #[tokio::test]
    async fn test_get_unknown_session_is_404() {
        let err = get(State(test_state()), Path(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
