/// Audiobook Admin - command line administration of audiobooks
use anyhow::{bail, Context};
use audiobook_admin::{AdminConfig, App};
use audiobook_core::embed::{embed_url, iframe_code, EmbedOptions};
use audiobook_core::format::{format_file_size, format_time};
use audiobook_core::{
    AudiobookId, AudiobookStore, CreatePlaylist, PlaylistId, PlaylistStore, ThumbnailPosition,
    TrackId,
};
use audiobook_editor::{
    load_player_content, AudiobookChanges, AudiobookDraft, AudiobookForm, Dashboard, PlayerSource,
    RenumberStrategy, TrackEditor, UploadBatch, UploadEvent, UploadSequencer,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "audiobook-admin")]
#[command(about = "Manage audiobooks, their tracks and embeddable players", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "AUDIOBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List audiobooks, newest first
    List,
    /// Show one audiobook with its tracks
    Show {
        audiobook: String,
    },
    /// Create an audiobook
    Create {
        #[command(flatten)]
        fields: AudiobookFields,
    },
    /// Update an audiobook; fields not given keep their stored values
    Update {
        audiobook: String,
        #[command(flatten)]
        changes: ChangedFields,
    },
    /// Delete an audiobook and all of its tracks
    Delete {
        audiobook: String,
    },
    /// Upload MP3 files as new tracks, numbered after the existing ones
    Upload {
        audiobook: String,
        /// Files to upload, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Move a track onto the position of another track and save the order
    Reorder {
        audiobook: String,
        /// Track to move
        dragged: String,
        /// Track whose position it takes
        target: String,
        #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
        strategy: StrategyArg,
    },
    /// Rewrite track numbers as 1..n in the current order
    Save {
        audiobook: String,
        #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
        strategy: StrategyArg,
    },
    /// Rename a track
    RenameTrack {
        audiobook: String,
        track: String,
        name: String,
    },
    /// Delete a track; the remaining tracks keep their numbers
    DeleteTrack {
        audiobook: String,
        track: String,
    },
    /// Print the embed code for an audiobook
    Embed {
        audiobook: String,
        #[arg(long, default_value = "100%")]
        width: String,
        #[arg(long, default_value = "500")]
        height: String,
    },
    /// Print what the embeddable player shows
    Player {
        #[arg(value_enum)]
        kind: PlayerKind,
        id: String,
    },
    /// Manage playlists
    #[command(subcommand)]
    Playlist(PlaylistCommands),
}

#[derive(Subcommand)]
enum PlaylistCommands {
    /// Create a playlist
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        thumbnail_url: Option<String>,
    },
    /// Append a track to a playlist
    Add {
        playlist: String,
        track: String,
    },
}

#[derive(clap::Args)]
struct AudiobookFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Publication date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Cover focus: an anchor such as "top left" or "X% Y%"
    #[arg(long, default_value = "center")]
    thumbnail_position: ThumbnailPosition,
    /// Cover image to upload
    #[arg(long)]
    thumbnail: Option<PathBuf>,
}

impl AudiobookFields {
    fn draft(&self) -> AudiobookDraft {
        let mut draft = AudiobookDraft::named(self.name.clone());
        draft.author = self.author.clone();
        draft.description = self.description.clone();
        if let Some(date) = self.date {
            draft.created_date = date;
        }
        draft.thumbnail_position = self.thumbnail_position;
        draft
    }
}

#[derive(clap::Args)]
struct ChangedFields {
    #[arg(long)]
    name: Option<String>,
    /// New author; an empty value clears it
    #[arg(long)]
    author: Option<String>,
    /// New description; an empty value clears it
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long)]
    thumbnail_position: Option<ThumbnailPosition>,
    /// New cover image to upload
    #[arg(long)]
    thumbnail: Option<PathBuf>,
}

impl ChangedFields {
    fn changes(&self) -> AudiobookChanges {
        AudiobookChanges {
            name: self.name.clone(),
            author: self.author.clone(),
            description: self.description.clone(),
            created_date: self.date,
            thumbnail_position: self.thumbnail_position,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Auto,
    TwoPhase,
    Transactional,
}

impl From<StrategyArg> for RenumberStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::TwoPhase => Self::TwoPhase,
            StrategyArg::Transactional => Self::Transactional,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PlayerKind {
    Audiobook,
    Playlist,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "audiobook_admin=info,audiobook_editor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AdminConfig::load(cli.config.as_deref())?;
    let app = App::connect(config).await?;
    let json = cli.json;

    match cli.command {
        Commands::List => list(&app, json).await?,
        Commands::Show { audiobook } => show(&app, &AudiobookId::new(audiobook), json).await?,
        Commands::Create { fields } => {
            let thumbnail = prepare_thumbnail(fields.thumbnail.as_deref()).await?;
            let form = AudiobookForm::new(app.audiobooks(), app.objects.clone());
            let created = form.create(fields.draft(), thumbnail).await?;
            print_result(json, &created, || format!("Created {} ({})", created.name, created.id))?;
        }
        Commands::Update { audiobook, changes } => {
            let thumbnail = prepare_thumbnail(changes.thumbnail.as_deref()).await?;
            let form = AudiobookForm::new(app.audiobooks(), app.objects.clone());
            let updated = form
                .edit(&AudiobookId::new(audiobook), changes.changes(), thumbnail)
                .await?;
            print_result(json, &updated, || format!("Updated {} ({})", updated.name, updated.id))?;
        }
        Commands::Delete { audiobook } => {
            let form = AudiobookForm::new(app.audiobooks(), app.objects.clone());
            form.delete(&AudiobookId::new(audiobook.clone())).await?;
            println!("Deleted audiobook {audiobook}");
        }
        Commands::Upload { audiobook, files } => {
            upload(&app, &AudiobookId::new(audiobook), &files, json).await?;
        }
        Commands::Reorder {
            audiobook,
            dragged,
            target,
            strategy,
        } => {
            let mut editor = open_editor(&app, audiobook, strategy).await?;
            if !editor.reorder(&TrackId::new(dragged), &TrackId::new(target)) {
                bail!("Nothing to reorder: both tracks must exist and differ");
            }
            let outcome = editor.save_order().await?;
            print_result(json, &editor.tracks(), || {
                format!(
                    "Saved order of {} tracks ({})",
                    outcome.tracks_renumbered, outcome.strategy
                )
            })?;
        }
        Commands::Save {
            audiobook,
            strategy,
        } => {
            let mut editor = open_editor(&app, audiobook, strategy).await?;
            let outcome = editor.save_order().await?;
            print_result(json, &outcome, || {
                format!(
                    "Renumbered {} tracks ({})",
                    outcome.tracks_renumbered, outcome.strategy
                )
            })?;
        }
        Commands::RenameTrack {
            audiobook,
            track,
            name,
        } => {
            let mut editor = open_editor(&app, audiobook, StrategyArg::Auto).await?;
            editor.rename(&TrackId::new(track), &name).await?;
            println!("Renamed track to {}", name.trim());
        }
        Commands::DeleteTrack { audiobook, track } => {
            let mut editor = open_editor(&app, audiobook, StrategyArg::Auto).await?;
            let removed = editor.delete(&TrackId::new(track)).await?;
            println!("Deleted track {} ({})", removed.track_number, removed.name);
        }
        Commands::Embed {
            audiobook,
            width,
            height,
        } => {
            let id = AudiobookId::new(audiobook);
            let book = app
                .store
                .get_audiobook(&id)
                .await?
                .with_context(|| format!("Audiobook not found: {id}"))?;
            let base_url = &app.config.embed.base_url;
            println!("{}", embed_url(base_url, &id));
            println!();
            println!("{}", iframe_code(base_url, &book, &EmbedOptions { width, height }));
        }
        Commands::Player { kind, id } => {
            let source = match kind {
                PlayerKind::Audiobook => PlayerSource::Audiobook(AudiobookId::new(id)),
                PlayerKind::Playlist => PlayerSource::Playlist(PlaylistId::new(id)),
            };
            let content = load_player_content(app.store.as_ref(), &source).await?;
            print_result(json, &content, || {
                let mut out = format!(
                    "{} ({} tracks, {})",
                    content.title,
                    content.tracks.len(),
                    format_time(content.total_duration_seconds())
                );
                for (index, track) in content.tracks.iter().enumerate() {
                    out.push_str(&format!("\n{:>3}. {}", index + 1, track.name));
                }
                out
            })?;
        }
        Commands::Playlist(command) => playlist(&app, command, json).await?,
    }

    Ok(())
}

async fn list(app: &App, json: bool) -> anyhow::Result<()> {
    let dashboard = Dashboard::load(app.store.as_ref()).await?;
    print_result(json, &dashboard, || {
        let mut out = format!(
            "{} audiobooks, {} tracks",
            dashboard.audiobooks.len(),
            dashboard.total_tracks()
        );
        for book in &dashboard.audiobooks {
            out.push_str(&format!(
                "\n{}  {}  [{} tracks]{}",
                book.id,
                book.name,
                book.track_count,
                book.author
                    .as_deref()
                    .map(|a| format!("  by {a}"))
                    .unwrap_or_default()
            ));
        }
        out
    })
}

async fn show(app: &App, id: &AudiobookId, json: bool) -> anyhow::Result<()> {
    let book = app
        .store
        .get_audiobook(id)
        .await?
        .with_context(|| format!("Audiobook not found: {id}"))?;
    let editor = TrackEditor::load(app.tracks(), app.session.clone(), id.clone()).await?;

    #[derive(Serialize)]
    struct ShowOutput<'a> {
        audiobook: &'a audiobook_core::Audiobook,
        tracks: &'a [audiobook_core::Track],
    }

    let output = ShowOutput {
        audiobook: &book,
        tracks: editor.tracks(),
    };
    print_result(json, &output, || {
        let mut out = format!(
            "{} ({})\nPublished {}  Cover focus {}  Total {}",
            book.name,
            book.id,
            book.created_date,
            book.thumbnail_position,
            format_time(editor.track_list().total_duration_seconds())
        );
        for track in editor.tracks() {
            out.push_str(&format!(
                "\n{:>4}  {:<40}  {:>8}  {:>9}  {}",
                track.track_number,
                track.name,
                format_time(u64::from(track.duration_seconds)),
                format_file_size(track.file_size),
                track.id
            ));
        }
        out
    })
}

async fn upload(app: &App, id: &AudiobookId, files: &[PathBuf], json: bool) -> anyhow::Result<()> {
    if app.store.get_audiobook(id).await?.is_none() {
        bail!("Audiobook not found: {id}");
    }

    let mut batch = UploadBatch::new();
    for path in files {
        match audiobook_media::prepare_track(path).await {
            Ok(prepared) => {
                batch.add(prepared);
            }
            Err(e) => tracing::warn!(file = %path.display(), error = %e, "Skipping file"),
        }
    }
    if batch.is_empty() {
        bail!("No uploadable MP3 files given");
    }

    let sequencer = UploadSequencer::new(app.tracks(), app.objects.clone());
    let observer = |event: &UploadEvent| match event {
        UploadEvent::Started { item, track_number } => {
            tracing::info!(%item, track_number, "Uploading");
        }
        UploadEvent::Failed { item, error } => {
            tracing::warn!(%item, %error, "Upload failed");
        }
        UploadEvent::Progress { .. } | UploadEvent::Completed { .. } => {}
    };
    let summary = sequencer.run(id, &mut batch, &observer).await?;

    print_result(json, &summary, || {
        let mut out = format!(
            "Uploaded {} of {} files",
            summary.completed, summary.attempted
        );
        for item in batch.items() {
            let number = item
                .track_number
                .map_or_else(|| "-".to_string(), |n| n.to_string());
            out.push_str(&format!("\n{:>4}  {}  {:?}", number, item.name, item.status));
        }
        out
    })?;

    if !summary.is_success() {
        bail!("{} of {} uploads failed", summary.failed, summary.attempted);
    }
    Ok(())
}

async fn playlist(app: &App, command: PlaylistCommands, json: bool) -> anyhow::Result<()> {
    match command {
        PlaylistCommands::Create {
            name,
            description,
            thumbnail_url,
        } => {
            if name.trim().is_empty() {
                bail!("Playlist name cannot be empty");
            }
            let created = app
                .store
                .create_playlist(CreatePlaylist {
                    name: name.trim().to_string(),
                    description,
                    thumbnail_url,
                })
                .await?;
            print_result(json, &created, || format!("Created playlist {} ({})", created.name, created.id))
        }
        PlaylistCommands::Add { playlist, track } => {
            app.store
                .add_track_to_playlist(&PlaylistId::new(playlist.clone()), &TrackId::new(track.clone()))
                .await?;
            println!("Added track {track} to playlist {playlist}");
            Ok(())
        }
    }
}

async fn open_editor(app: &App, audiobook: String, strategy: StrategyArg) -> anyhow::Result<TrackEditor> {
    let editor = TrackEditor::load(app.tracks(), app.session.clone(), AudiobookId::new(audiobook))
        .await?
        .with_strategy(strategy.into());
    Ok(editor)
}

async fn prepare_thumbnail(
    path: Option<&std::path::Path>,
) -> anyhow::Result<Option<audiobook_media::PreparedImage>> {
    match path {
        Some(path) => Ok(Some(
            audiobook_media::prepare_thumbnail(path)
                .await
                .with_context(|| format!("Invalid cover image {}", path.display()))?,
        )),
        None => Ok(None),
    }
}

fn print_result<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}
