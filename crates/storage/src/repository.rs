//! Repository Implementation

use crate::StorageError;
use chrono::{DateTime, Utc};
use fatigue_analysis::session::FrameResult;
use serde::{Deserialize, Serialize};
use session_aggregate::SessionResult;
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// Stored per-frame analysis record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    pub session_id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub result: FrameResult,
}

/// Stored session-level record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub result: SessionResult,
}

/// Repository for analysis records (in-memory implementation)
pub struct Repository {
    /// Frame records, oldest first
    frame_log: Mutex<VecDeque<FrameRecord>>,
    /// Completed session records
    sessions: Mutex<Vec<SessionRecord>>,
    /// Retention cap for frame records (~1 hour of 15 fps capture)
    max_frame_records: usize,
    /// Retention cap for session records
    max_session_records: usize,
}

impl Repository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        info!("Creating in-memory repository");
        Self {
            frame_log: Mutex::new(VecDeque::with_capacity(10_000)),
            sessions: Mutex::new(Vec::with_capacity(1_000)),
            max_frame_records: 50_000,
            max_session_records: 10_000,
        }
    }

    /// Insert a frame record
    pub fn insert_frame(&self, record: FrameRecord) -> Result<(), StorageError> {
        let mut log = self
            .frame_log
            .lock()
            .map_err(|e| StorageError::Access(format!("Lock error: {}", e)))?;

        // Enforce retention
        while log.len() >= self.max_frame_records {
            log.pop_front();
        }

        debug!(session_id = %record.session_id, "inserting frame record");
        log.push_back(record);
        Ok(())
    }

    /// Frame records for one session, in insertion order
    pub fn frames_for_session(&self, session_id: Uuid) -> Result<Vec<FrameRecord>, StorageError> {
        let log = self
            .frame_log
            .lock()
            .map_err(|e| StorageError::Access(format!("Lock error: {}", e)))?;

        Ok(log
            .iter()
            .filter(|r| r.session_id == session_id)
            .cloned()
            .collect())
    }

    /// Insert a completed session record
    pub fn insert_session(&self, record: SessionRecord) -> Result<(), StorageError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Access(format!("Lock error: {}", e)))?;

        while sessions.len() >= self.max_session_records {
            sessions.remove(0);
        }

        info!(
            session_id = %record.session_id,
            fatigue_score = record.result.fatigue_score,
            "storing session record"
        );
        sessions.push(record);
        Ok(())
    }

    /// Most recent session records, newest first
    pub fn recent_sessions(&self, limit: usize) -> Result<Vec<SessionRecord>, StorageError> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Access(format!("Lock error: {}", e)))?;

        Ok(sessions.iter().rev().take(limit).cloned().collect())
    }

    /// One session record by id
    pub fn get_session(&self, session_id: Uuid) -> Result<SessionRecord, StorageError> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Access(format!("Lock error: {}", e)))?;

        sessions
            .iter()
            .find(|r| r.session_id == session_id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    /// Session records completed at or after the given time
    pub fn sessions_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<SessionRecord>, StorageError> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Access(format!("Lock error: {}", e)))?;

        Ok(sessions
            .iter()
            .filter(|r| r.completed_at >= since)
            .cloned()
            .collect())
    }

    /// Total stored frame records
    pub fn frame_count(&self) -> usize {
        self.frame_log.lock().map(|log| log.len()).unwrap_or(0)
    }

    /// Total stored session records
    pub fn session_count(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}
