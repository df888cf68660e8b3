//! Frame Routes

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiError, SharedState};
use face_landmarks::point::{FaceLandmarks, LandmarkPoint};
use fatigue_analysis::FrameResult;
use storage::FrameRecord;

/// One frame's landmarks as submitted by the capture collaborator
///
/// The capture side only posts frames where a face was detected;
/// no-detection frames are simply absent from the session.
#[derive(Debug, Deserialize)]
pub struct FrameSubmission {
    /// Capture timestamp (milliseconds)
    pub timestamp_ms: u64,
    /// Detection confidence in [0, 1]
    pub confidence: f64,
    /// Landmark coordinates in topology index order
    pub points: Vec<[f64; 2]>,
}

/// Submit one frame's landmarks and get its analysis result
pub async fn submit(
    State(state): State<SharedState>,
    Path(session_id): Path<Uuid>,
    Json(submission): Json<FrameSubmission>,
) -> Result<Json<FrameResult>, ApiError> {
    let mut state = state.write().await;

    let landmarks = FaceLandmarks::new(
        submission
            .points
            .iter()
            .map(|&[x, y]| LandmarkPoint::new(x, y))
            .collect(),
        submission.confidence,
    );

    let live = state
        .live
        .get_mut(&session_id)
        .ok_or_else(|| ApiError::not_found(format!("no open session {session_id}")))?;

    let result = live.analyzer.analyze(&landmarks, submission.timestamp_ms);
    live.frames.push(result.clone());

    state
        .repository
        .insert_frame(FrameRecord {
            session_id,
            recorded_at: Utc::now(),
            result: result.clone(),
        })
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(result))
}

/// Response for the frame list
#[derive(Debug, Serialize)]
pub struct FrameList {
    pub data: Vec<FrameRecord>,
    pub count: usize,
}

/// List the stored frame records for a session
pub async fn list(
    State(state): State<SharedState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<FrameList>, ApiError> {
    let state = state.read().await;
    let data = state
        .repository
        .frames_for_session(session_id)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(FrameList {
        count: data.len(),
        data,
    }))
}
