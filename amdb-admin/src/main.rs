//! amdb-admin - command-line console for the music database admin pages
//!
//! Each subcommand opens the admin page the control lives on, fills the
//! form the way a user would, runs the page handler and prints the
//! resulting list rows and feedback report.

use amdb_admin::document::SelectOption;
use amdb_admin::families::{
    EntityFamily, RenderedRow, ARTIST_NAMES, LINE_UP_MEMBERS, SONG_ARTISTS,
};
use amdb_admin::feedback::Outcome;
use amdb_admin::page::{
    artist_dropdown_id, artist_input_id, hidden_artist_input_id, line_up_input_id,
    role_type_select_id, NEW_NAME_INPUT, NEW_ORIGINAL_NAME_INPUT,
};
use amdb_admin::sync::ListSynchronizer;
use amdb_admin::Page;
use amdb_common::config::{default_config_path, ClientConfig, TomlConfig, DEFAULT_LOG_LEVEL};
use amdb_common::models::{LineupMembership, NamedEntity};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "amdb-admin", version, about = "Music database admin console")]
struct Cli {
    /// Database server origin (overrides AMDB_SERVER_URL and config file)
    #[arg(long)]
    server: Option<String>,

    /// Config file (default: ~/.config/amdb/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Membership form fields shared by lineup members and song artists
#[derive(Debug, clap::Args)]
struct MemberArgs {
    /// Artist to add
    #[arg(long)]
    artist: i64,
    /// Artist display name shown in the list
    #[arg(long, default_value = "")]
    artist_name: String,
    /// Lineup of the added artist
    #[arg(long)]
    artist_line_up: Option<i64>,
    #[arg(long, default_value_t = 1)]
    role: i64,
    #[arg(long, default_value = "Performer")]
    role_label: String,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a name to an artist
    AddName {
        artist: i64,
        name: String,
        #[arg(long, default_value = "")]
        original: String,
    },
    /// Update an artist name
    EditName {
        artist: i64,
        id: i64,
        name: String,
        #[arg(long, default_value = "")]
        original: String,
    },
    /// Delete an artist name
    RemoveName { artist: i64, id: i64 },
    /// Update the original name of an anime name
    EditAnimeName { anime: i64, id: i64, original: String },
    /// Submit a new name order (ids in display order)
    ReorderNames {
        artist: i64,
        #[arg(value_delimiter = ',', required = true)]
        ids: Vec<i64>,
    },
    /// Create a lineup for an artist
    AddLineUp { artist: i64 },
    /// Delete a lineup
    RemoveLineUp { line_up: i64 },
    /// Add a member to a lineup
    AddMember {
        /// Artist owning the lineup
        group: i64,
        line_up: i64,
        #[command(flatten)]
        member: MemberArgs,
    },
    /// Remove a lineup member link
    RemoveMember { group: i64, link: i64 },
    /// Credit an artist on a song
    AddSongArtist {
        song: i64,
        #[command(flatten)]
        member: MemberArgs,
    },
    /// Remove a song artist credit
    RemoveSongArtist { song: i64, link: i64 },
    /// Search artists by localized or original name
    SearchArtists { term: String },
    /// List the lineups of an artist
    SearchLineUps { artist: i64 },
}

/// Form suffix used by the song page's "add artist" form
const SONG_FORM: &str = "song";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Start at INFO so config loading is visible, then apply the configured level
    let (filter, filter_handle) = reload::Layer::new(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    info!("Starting amdb-admin v{}", env!("CARGO_PKG_VERSION"));

    let config_path = cli.config.clone().or_else(default_config_path);
    let toml_config = TomlConfig::load_or_default(config_path.as_deref());
    let config = ClientConfig::resolve(cli.server.as_deref(), &toml_config)
        .context("Invalid configuration")?;

    if std::env::var("RUST_LOG").is_err() {
        filter_handle
            .reload(EnvFilter::new(&config.log_level))
            .context("Invalid log_level")?;
    }
    info!("Server: {}", config.server_url);

    let page = run(&config, cli.command).await?;

    print_page(&page);
    let failed = page
        .feedback
        .current()
        .is_some_and(|report| report.outcome == Outcome::Error);
    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

async fn run(config: &ClientConfig, command: Command) -> Result<Page> {
    let page = match command {
        Command::AddName {
            artist,
            name,
            original,
        } => {
            let mut page = open(config, &format!("/artists/{}/", artist))?;
            page.document.add_list(ARTIST_NAMES.list_id(""));
            page.document.set_input(NEW_NAME_INPUT, name);
            page.document.set_input(NEW_ORIGINAL_NAME_INPUT, original);
            page.add_artist_name().await;
            page
        }
        Command::EditName {
            artist,
            id,
            name,
            original,
        } => {
            let mut page = open(config, &format!("/artists/{}/", artist))?;
            seed_name(&mut page, id, &name, &original)?;
            page.edit_artist_name(id).await;
            page
        }
        Command::RemoveName { artist, id } => {
            let mut page = open(config, &format!("/artists/{}/", artist))?;
            seed_name(&mut page, id, "", "")?;
            page.remove_artist_name(id).await;
            page
        }
        Command::EditAnimeName {
            anime,
            id,
            original,
        } => {
            let mut page = open(config, &format!("/anime/{}/", anime))?;
            let field_id = format!("original-name-{}", id);
            page.document.set_input(field_id, original);
            page.edit_anime_name(id).await;
            page
        }
        Command::ReorderNames { artist, ids } => {
            let mut page = open(config, &format!("/artists/{}/", artist))?;
            for id in ids {
                seed_name(&mut page, id, "", "")?;
            }
            page.reorder_names().await;
            page
        }
        Command::AddLineUp { artist } => {
            let mut page = open(config, &format!("/artists/{}/", artist))?;
            page.add_line_up(artist).await;
            page
        }
        Command::RemoveLineUp { line_up } => {
            let mut page = open(config, "/")?;
            page.remove_line_up(line_up).await;
            page
        }
        Command::AddMember {
            group,
            line_up,
            member,
        } => {
            let mut page = open(config, &format!("/artists/{}/", group))?;
            let element = line_up.to_string();
            page.document.add_list(LINE_UP_MEMBERS.list_id(&element));
            fill_member_form(&mut page, &element, &member);
            page.add_line_up_member(line_up).await;
            page
        }
        Command::RemoveMember { group, link } => {
            let mut page = open(config, &format!("/artists/{}/", group))?;
            seed_membership(&mut page, &LINE_UP_MEMBERS, "0", link)?;
            page.remove_line_up_member(link).await;
            page
        }
        Command::AddSongArtist { song, member } => {
            let mut page = open(config, &format!("/songs/{}/", song))?;
            page.document.add_list(SONG_ARTISTS.list_id(SONG_FORM));
            fill_member_form(&mut page, SONG_FORM, &member);
            page.add_song_artist(SONG_FORM).await;
            page
        }
        Command::RemoveSongArtist { song, link } => {
            let mut page = open(config, &format!("/songs/{}/", song))?;
            seed_membership(&mut page, &SONG_ARTISTS, SONG_FORM, link)?;
            page.remove_song_artist(link).await;
            page
        }
        Command::SearchArtists { term } => {
            let mut page = open(config, "/")?;
            page.document.set_input(artist_input_id(SONG_FORM), term);
            page.handle_artist_search(SONG_FORM).await;
            if let Some(dropdown) = page.document.dropdown(&artist_dropdown_id(SONG_FORM)) {
                for option in dropdown.options() {
                    println!("{:>8}  {}", option.value, option.label);
                }
            }
            page
        }
        Command::SearchLineUps { artist } => {
            let mut page = open(config, "/")?;
            page.fetch_line_ups(SONG_FORM, artist).await;
            for option in page.line_up_cache().options("") {
                println!("{}", option.label);
            }
            page
        }
    };
    Ok(page)
}

fn open(config: &ClientConfig, page_path: &str) -> Result<Page> {
    Page::open(config, page_path).with_context(|| format!("Cannot open page {}", page_path))
}

/// Render a name row as the server would have
fn seed_name(page: &mut Page, id: i64, name: &str, original: &str) -> Result<()> {
    page.document.add_list(ARTIST_NAMES.list_id(""));
    let entity = NamedEntity {
        id,
        display_name: name.to_string(),
        original_name: original.to_string(),
        order: page.document.list_len(&ARTIST_NAMES.list_id("")) as u32 + 1,
    };
    ListSynchronizer::new(&ARTIST_NAMES).insert(
        &mut page.document,
        "",
        &RenderedRow::from(&entity),
    )?;
    Ok(())
}

fn seed_membership(
    page: &mut Page,
    family: &EntityFamily,
    scope: &str,
    link: i64,
) -> Result<()> {
    page.document.add_list(family.list_id(scope));
    let row = RenderedRow::Membership {
        membership: LineupMembership {
            link_id: link,
            artist_id: 0,
            lineup_id: None,
            role_type_id: 0,
        },
        artist_name: String::new(),
        role_label: String::new(),
    };
    ListSynchronizer::new(family).insert(&mut page.document, scope, &row)?;
    Ok(())
}

fn fill_member_form(page: &mut Page, element: &str, member: &MemberArgs) {
    page.document
        .set_input(artist_input_id(element), member.artist_name.clone());
    page.document
        .set_input(hidden_artist_input_id(element), member.artist.to_string());
    page.document.set_input(
        line_up_input_id(element),
        member.artist_line_up.map(|id| id.to_string()).unwrap_or_default(),
    );
    page.document.add_select(
        role_type_select_id(element),
        vec![SelectOption {
            value: member.role.to_string(),
            text: member.role_label.clone(),
        }],
    );
}

fn print_page(page: &Page) {
    for list_id in page.document.list_ids() {
        for item in page.document.list(list_id).unwrap_or_default() {
            let values: Vec<&str> = item.fields.iter().map(|f| f.value.as_str()).collect();
            println!("{} [{}] {}", list_id, item.data_id, values.join(" | "));
        }
    }

    if let Some(report) = page.feedback.current() {
        match report.severity {
            Some(severity) => println!("{} ({}): {}", report.title(), severity, report.body),
            None => println!("{}: {}", report.title(), report.body),
        }
    }
}
