//! Creating and updating audiobooks, and the dashboard listing

use crate::error::{EditorError, Result};
use audiobook_core::{
    Audiobook, AudiobookError, AudiobookId, AudiobookStore, CreateAudiobook, ObjectKey, ObjectStore,
    ThumbnailPosition, UpdateAudiobook,
};
use audiobook_media::PreparedImage;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Editable fields of an audiobook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudiobookDraft {
    pub name: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub created_date: NaiveDate,
    pub thumbnail_position: ThumbnailPosition,
}

impl AudiobookDraft {
    /// Draft with only a name, dated today
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            author: None,
            description: None,
            created_date: chrono::Utc::now().date_naive(),
            thumbnail_position: ThumbnailPosition::default(),
        }
    }

    /// Draft prefilled from a stored audiobook
    pub fn from_audiobook(audiobook: &Audiobook) -> Self {
        Self {
            name: audiobook.name.clone(),
            author: audiobook.author.clone(),
            description: audiobook.description.clone(),
            created_date: audiobook.created_date,
            thumbnail_position: audiobook.thumbnail_position,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(EditorError::validation("Audiobook name is required"));
        }
        Ok(())
    }

    fn into_create(self) -> CreateAudiobook {
        CreateAudiobook {
            name: self.name.trim().to_string(),
            author: non_blank(self.author),
            description: non_blank(self.description),
            created_date: self.created_date,
            thumbnail_position: self.thumbnail_position,
        }
    }

    fn into_update(self, thumbnail_url: Option<String>) -> UpdateAudiobook {
        UpdateAudiobook {
            name: self.name.trim().to_string(),
            author: non_blank(self.author),
            description: non_blank(self.description),
            created_date: self.created_date,
            thumbnail_position: self.thumbnail_position,
            thumbnail_url,
        }
    }
}

/// Fields to change on a stored audiobook; `None` keeps the stored value
///
/// An empty `author` or `description` clears that field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudiobookChanges {
    pub name: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub created_date: Option<NaiveDate>,
    pub thumbnail_position: Option<ThumbnailPosition>,
}

impl AudiobookChanges {
    /// Overlay the given fields onto `draft`
    pub fn apply(self, mut draft: AudiobookDraft) -> AudiobookDraft {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(author) = self.author {
            draft.author = Some(author);
        }
        if let Some(description) = self.description {
            draft.description = Some(description);
        }
        if let Some(date) = self.created_date {
            draft.created_date = date;
        }
        if let Some(position) = self.thumbnail_position {
            draft.thumbnail_position = position;
        }
        draft
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Writes audiobooks together with their cover images
pub struct AudiobookForm {
    audiobooks: Arc<dyn AudiobookStore>,
    objects: Arc<dyn ObjectStore>,
}

impl AudiobookForm {
    pub fn new(audiobooks: Arc<dyn AudiobookStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self {
            audiobooks,
            objects,
        }
    }

    /// Insert a new audiobook, then attach the cover image if one is given
    pub async fn create(
        &self,
        draft: AudiobookDraft,
        thumbnail: Option<PreparedImage>,
    ) -> Result<Audiobook> {
        draft.validate()?;

        let audiobook = self.audiobooks.create_audiobook(draft.into_create()).await?;
        info!(audiobook_id = %audiobook.id, name = %audiobook.name, "Audiobook created");

        let Some(image) = thumbnail else {
            return Ok(audiobook);
        };

        let url = self.upload_thumbnail(&audiobook.id, image).await?;
        let updated = self
            .audiobooks
            .update_audiobook(&audiobook.id, UpdateAudiobook::thumbnail_only(&audiobook, url))
            .await?;
        Ok(updated)
    }

    /// Update an audiobook, uploading a new cover image first if one is given
    pub async fn update(
        &self,
        id: &AudiobookId,
        draft: AudiobookDraft,
        thumbnail: Option<PreparedImage>,
    ) -> Result<Audiobook> {
        draft.validate()?;

        let thumbnail_url = match thumbnail {
            Some(image) => Some(self.upload_thumbnail(id, image).await?),
            None => None,
        };

        let updated = self
            .audiobooks
            .update_audiobook(id, draft.into_update(thumbnail_url))
            .await?;
        info!(audiobook_id = %id, "Audiobook updated");
        Ok(updated)
    }

    /// Change some fields of a stored audiobook, keeping the others
    pub async fn edit(
        &self,
        id: &AudiobookId,
        changes: AudiobookChanges,
        thumbnail: Option<PreparedImage>,
    ) -> Result<Audiobook> {
        let current = self
            .audiobooks
            .get_audiobook(id)
            .await?
            .ok_or_else(|| AudiobookError::AudiobookNotFound(id.clone()))?;

        let draft = changes.apply(AudiobookDraft::from_audiobook(&current));
        self.update(id, draft, thumbnail).await
    }

    /// Delete an audiobook and all of its tracks
    pub async fn delete(&self, id: &AudiobookId) -> Result<()> {
        self.audiobooks.delete_audiobook(id).await?;
        info!(audiobook_id = %id, "Audiobook deleted");
        Ok(())
    }

    async fn upload_thumbnail(&self, id: &AudiobookId, image: PreparedImage) -> Result<String> {
        let key = ObjectKey::thumbnail(id, chrono::Utc::now().timestamp_millis(), &image.extension);
        let url = self
            .objects
            .put_object(&key, &image.content_type, image.bytes)
            .await?;
        info!(audiobook_id = %id, key = %key, "Thumbnail uploaded");
        Ok(url)
    }
}

/// Audiobooks newest first with their track counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub audiobooks: Vec<Audiobook>,
}

impl Dashboard {
    pub async fn load(store: &dyn AudiobookStore) -> Result<Self> {
        Ok(Self {
            audiobooks: store.get_audiobooks().await?,
        })
    }

    pub fn total_tracks(&self) -> u64 {
        self.audiobooks.iter().map(|a| u64::from(a.track_count)).sum()
    }
}
