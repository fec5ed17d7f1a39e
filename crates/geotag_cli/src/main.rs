//! Command-line front end for geotag.
//!
//! # Responsibility
//! - Wire the SQLite stores, field hooks and geo component together once.
//! - Expose item creation, geo editing, record inspection and feed output.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use geotag_core::db::open_db;
use geotag_core::{
    core_version, default_log_level, init_logging, register_geo_fields, write_feed, ContentItem,
    ContentKind, ContentListQuery, ContentRepository, FeedChannel, FeedDialect,
    FeedExtensionRegistry, GeoField, GeoLocate, GeoLocateConfig, MetaFieldRegistry, MetaValue,
    SqliteContentRepository, SqliteMetaStore,
};
use log::info;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "geotag", version, about = "Geo metadata for content items and GeoRSS feeds")]
struct Cli {
    /// SQLite database file (created when missing).
    #[arg(long, value_name = "FILE", default_value = "geotag.sqlite3")]
    db: PathBuf,

    /// JSON configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Absolute directory for rotating log files; logging is off when unset.
    #[arg(long, value_name = "DIR")]
    log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a content item and print its id.
    AddItem {
        #[arg(long, default_value = "post")]
        kind: ContentKind,
        #[arg(long)]
        title: String,
    },
    /// Write geo fields of an item. Values are sanitized on write.
    SetGeo {
        item: Uuid,
        #[arg(long)]
        public: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        latitude: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        longitude: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Print the resolved geo record of an item as JSON.
    Show { item: Uuid },
    /// Print a feed of all items.
    Feed {
        #[arg(long, default_value = "rss2")]
        dialect: FeedDialect,
        #[arg(long, default_value = "geotag")]
        title: String,
        #[arg(long, default_value = "http://localhost/")]
        link: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let config = match &cli.config {
        Some(path) => GeoLocateConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GeoLocateConfig::default(),
    };

    let conn = open_db(&cli.db).with_context(|| format!("opening {}", cli.db.display()))?;
    let mut fields = MetaFieldRegistry::new();
    register_geo_fields(&mut fields, &config)?;
    let items = SqliteContentRepository::new(&conn);
    let geo = GeoLocate::new(SqliteMetaStore::with_fields(&conn, fields), config);

    info!(
        "event=cli_start module=cli status=ok version={} db={}",
        core_version(),
        cli.db.display()
    );

    match cli.command {
        Command::AddItem { kind, title } => {
            let id = items.create_item(&ContentItem::new(kind, title))?;
            println!("{id}");
        }
        Command::SetGeo {
            item,
            public,
            latitude,
            longitude,
            address,
        } => {
            let Some(stored) = items.get_item(item)? else {
                bail!("content item not found: {item}");
            };
            if !geo.supports_kind(stored.kind) {
                bail!("content kind `{}` does not support geo-location", stored.kind);
            }
            let updates = [
                (GeoField::Public, public),
                (GeoField::Latitude, latitude),
                (GeoField::Longitude, longitude),
                (GeoField::Address, address),
            ];
            for (field, value) in updates {
                if let Some(value) = value {
                    geo.write_field(item, field, &MetaValue::from(value))?;
                }
            }
            println!("{}", serde_json::to_string_pretty(&geo.resolve_geo_record(item))?);
        }
        Command::Show { item } => {
            if items.get_item(item)?.is_none() {
                bail!("content item not found: {item}");
            }
            println!("{}", serde_json::to_string_pretty(&geo.resolve_geo_record(item))?);
        }
        Command::Feed {
            dialect,
            title,
            link,
        } => {
            let mut feeds = FeedExtensionRegistry::new();
            geo.install(&mut feeds)?;
            let listed = items.list_items(&ContentListQuery::default())?;
            let channel = FeedChannel::new(title, link);
            print!("{}", write_feed(dialect, &channel, &listed, &feeds));
        }
    }

    Ok(())
}
