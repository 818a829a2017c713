//! Command-line interface for mvnshelf.
//!
//! Provides commands for searching the registry, reading artifact metadata
//! and usage snippets, and managing local bookmark collections.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::RegistryClient;
use crate::collections::{CollectionStore, JsonFileStorage};
use crate::config;
use crate::domain::{ArtifactUsage, BuildTool};
use crate::preferences::UsagePreferences;

/// mvnshelf - Maven registry search with local bookmark collections
#[derive(Parser, Debug)]
#[command(name = "mvnshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the registry website
    Search {
        /// Search text
        query: String,

        /// Result page
        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Show artifact metadata and versions
    Info {
        /// Group id (e.g. org.slf4j)
        group_id: String,

        /// Artifact name (e.g. slf4j-api)
        artifact: String,
    },

    /// Show usage snippets of an artifact version
    Usage {
        group_id: String,
        artifact: String,
        version: String,

        /// Only show this build tool
        #[arg(short, long)]
        tool: Option<BuildTool>,
    },

    /// Query the structured search API
    ApiSearch {
        query: String,

        #[arg(short, long, default_value = "20")]
        rows: u32,

        #[arg(short, long, default_value = "0")]
        start: u32,
    },

    /// List collection directories and their bookmarks
    Dirs,

    /// Create a collection directory
    DirCreate {
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Make it the default directory
        #[arg(long)]
        default: bool,
    },

    /// Remove collection directories
    DirRemove {
        /// Directory ids
        #[arg(required = true)]
        ids: Vec<u64>,
    },

    /// Make a directory the default
    DirDefault { id: u64 },

    /// Bookmark an artifact version
    Collect {
        group_id: String,
        artifact: String,
        version: String,

        /// Target directory (default directory if not specified)
        #[arg(short, long)]
        dir: Option<u64>,

        /// Build tool whose snippet is stored (preferred tool if not specified)
        #[arg(short, long)]
        tool: Option<BuildTool>,
    },

    /// Remove a bookmark from a directory
    Uncollect {
        /// Directory id
        dir: u64,

        /// Collection id
        id: u64,
    },

    /// Check whether an artifact version is bookmarked
    Collected {
        group_id: String,
        artifact: String,
        version: String,
    },

    /// Show build tool preferences
    Tools {
        /// Set the preferred build tool
        #[arg(long)]
        default: Option<BuildTool>,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Search { query, page } => search(&query, page).await,
            Commands::Info { group_id, artifact } => show_info(&group_id, &artifact).await,
            Commands::Usage {
                group_id,
                artifact,
                version,
                tool,
            } => show_usage(&group_id, &artifact, &version, tool).await,
            Commands::ApiSearch { query, rows, start } => api_search(&query, rows, start).await,
            Commands::Dirs => list_dirs(),
            Commands::DirCreate {
                name,
                description,
                default,
            } => create_dir(&name, &description, default),
            Commands::DirRemove { ids } => remove_dirs(&ids),
            Commands::DirDefault { id } => set_default_dir(id),
            Commands::Collect {
                group_id,
                artifact,
                version,
                dir,
                tool,
            } => collect(&group_id, &artifact, &version, dir, tool).await,
            Commands::Uncollect { dir, id } => uncollect(dir, id),
            Commands::Collected {
                group_id,
                artifact,
                version,
            } => collected(&group_id, &artifact, &version),
            Commands::Tools { default } => show_tools(default),
            Commands::Config => show_config(),
        }
    }
}

fn registry() -> Result<RegistryClient> {
    let config = config::config()?;
    RegistryClient::new(&config.registry).context("Failed to create registry client")
}

fn open_storage() -> Result<JsonFileStorage> {
    let path = config::config()?.storage_path();
    JsonFileStorage::open(&path)
        .with_context(|| format!("Failed to open storage: {}", path.display()))
}

fn open_store() -> Result<CollectionStore<JsonFileStorage>> {
    CollectionStore::load(open_storage()?).context("Failed to load collections")
}

async fn search(query: &str, page: u32) -> Result<()> {
    let result = registry()?.search(query, page).await?;

    println!("{} results (page {})", result.total, page);
    println!();
    for item in &result.items {
        println!("{:>3}. {}", item.index, item.name);
        println!("     {}:{}", item.group_id, item.artifact_name);
        if !item.description.is_empty() {
            println!("     {}", item.description);
        }
        println!("     {}", item.last_release);
    }

    Ok(())
}

async fn show_info(group_id: &str, artifact: &str) -> Result<()> {
    let info = registry()?.artifact_info(group_id, artifact).await?;
    let store = open_store()?;

    println!("{}", info.name);
    println!("{}", info.description);
    println!();
    if !info.categories.is_empty() {
        println!("Categories: {}", info.categories);
    }
    if !info.tags.is_empty() {
        println!("Tags:       {}", info.tags.join(", "));
    }
    println!();

    for v in &info.versions {
        let mark = if store.is_artifact_collected(group_id, artifact, &v.version) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:<20} {:<16} {}",
            mark, v.version, v.repository, v.release_date
        );
    }

    Ok(())
}

fn print_usage(usage: &ArtifactUsage, tools: &[BuildTool]) {
    for tool in tools {
        println!("== {}", tool);
        println!("{}", usage.snippet(*tool));
        println!();
    }
}

async fn show_usage(
    group_id: &str,
    artifact: &str,
    version: &str,
    tool: Option<BuildTool>,
) -> Result<()> {
    let usage = registry()?
        .artifact_usage(group_id, artifact, version)
        .await?;

    if let Some(tool) = tool {
        print_usage(&usage, &[tool]);
        return Ok(());
    }

    let prefs = UsagePreferences::load(&open_storage()?)?;
    print_usage(&usage, &prefs.ordered_tools());
    for custom in &prefs.custom_templates {
        println!("== {}", custom.tool_name);
        println!("{}", custom.render(group_id, artifact, version));
        println!();
    }

    Ok(())
}

async fn api_search(query: &str, rows: u32, start: u32) -> Result<()> {
    let response = registry()?.search_api(query, rows, start).await?;

    println!(
        "{} found ({} ms)",
        response.response.num_found, response.response_header.query_time
    );
    for doc in &response.response.docs {
        println!(
            "{:<50} {:<16} {}",
            doc.id,
            doc.latest_version.as_deref().unwrap_or("-"),
            doc.packaging.as_deref().unwrap_or("")
        );
    }

    Ok(())
}

fn list_dirs() -> Result<()> {
    let store = open_store()?;

    for dir in store.directories() {
        let mark = if dir.is_default { " (default)" } else { "" };
        println!("[{}] {}{}", dir.id, dir.name, mark);
        if !dir.description.is_empty() {
            println!("    {}", dir.description);
        }
        for c in &dir.collections {
            println!(
                "    #{:<4} {}:{}:{}  [{}]",
                c.id, c.group_id, c.artifact_name, c.version, c.action
            );
        }
    }

    Ok(())
}

fn create_dir(name: &str, description: &str, default: bool) -> Result<()> {
    let mut store = open_store()?;
    let id = store.create_collection_dir(name, description, default)?;
    println!("Created directory {} ({})", id, name);
    Ok(())
}

fn remove_dirs(ids: &[u64]) -> Result<()> {
    let mut store = open_store()?;
    let removed = store.remove_collection_dirs(ids)?;
    println!("Removed {} directories", removed);
    Ok(())
}

fn set_default_dir(id: u64) -> Result<()> {
    let mut store = open_store()?;
    store.set_default_dir(id)?;
    println!("Directory {} is now the default", id);
    Ok(())
}

async fn collect(
    group_id: &str,
    artifact: &str,
    version: &str,
    dir: Option<u64>,
    tool: Option<BuildTool>,
) -> Result<()> {
    let mut store = open_store()?;
    let tool = match tool {
        Some(tool) => tool,
        None => UsagePreferences::load(store.storage())?.default_tool,
    };

    let usage = registry()?
        .artifact_usage(group_id, artifact, version)
        .await?;

    let collection = store.create_collection(
        group_id,
        artifact,
        version,
        tool.name(),
        usage.snippet(tool),
    );
    let id = collection.id;

    match dir {
        Some(dir) => store.add_collection_to_dir(dir, collection)?,
        None => store.add_collection_to_default_dir(collection)?,
    }

    println!("Collected {}:{}:{} as #{}", group_id, artifact, version, id);
    Ok(())
}

fn uncollect(dir: u64, id: u64) -> Result<()> {
    let mut store = open_store()?;
    store.remove_collection_from(dir, id)?;
    println!("Removed #{} from directory {}", id, dir);
    Ok(())
}

fn collected(group_id: &str, artifact: &str, version: &str) -> Result<()> {
    let store = open_store()?;
    if store.is_artifact_collected(group_id, artifact, version) {
        println!("yes");
        for (dir, c) in store.collections_of(group_id, artifact) {
            if c.version == version {
                println!("  #{} in [{}] {}", c.id, dir.id, dir.name);
            }
        }
    } else {
        println!("no");
    }
    Ok(())
}

fn show_tools(default: Option<BuildTool>) -> Result<()> {
    let mut storage = open_storage()?;
    let mut prefs = UsagePreferences::load(&storage)?;
    if let Some(tool) = default {
        prefs.default_tool = tool;
        prefs.save(&mut storage)?;
    }

    println!("Default: {}", prefs.default_tool);
    for (position, tool) in prefs.ordered_tools().iter().enumerate() {
        println!("  {}. {}", position + 1, tool);
    }
    for custom in &prefs.custom_templates {
        println!("  custom: {} = {}", custom.tool_name, custom.template);
    }
    Ok(())
}

fn show_config() -> Result<()> {
    let config = config::config()?;

    println!("mvnshelf configuration");
    println!("======================");
    println!();
    match &config.config_file {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (none)"),
    }
    println!("Home:        {}", config.home.display());
    println!("Storage:     {}", config.storage_path().display());
    println!("Registry:    {}", config.registry.web_url);
    println!("Search API:  {}", config.registry.api_url);
    println!("Timeout:     {}s", config.registry.timeout_seconds);

    Ok(())
}
