mod audiobook;
mod ids;
mod playlist;
mod thumbnail;
mod track;

pub use audiobook::{Audiobook, CreateAudiobook, UpdateAudiobook};
pub use ids::{AudiobookId, PlaylistId, TrackId};
pub use playlist::{CreatePlaylist, Playlist};
pub use thumbnail::{ThumbnailAnchor, ThumbnailPosition};
pub use track::{CreateTrack, Track, TrackNumberAssignment};
