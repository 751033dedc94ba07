use clap::{Parser, Subcommand, ValueEnum};
use linkshelf_client::preferences::DEFAULT_PREFERENCES_PATH;
use linkshelf_client::{BookmarkController, HttpBookmarkApi};
use linkshelf_common::{Bookmark, BookmarkPayload};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Command-line client for the linkshelf bookmark server")]
struct Args {
    /// Base address of the bookmark server
    #[arg(long, env = "LINKSHELF_SERVER", default_value = "http://localhost:3001")]
    server: String,

    /// Where client preferences (dark mode) are stored
    #[arg(long, default_value = DEFAULT_PREFERENCES_PATH)]
    preferences: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List bookmarks in the order the server keeps them
    List {
        #[arg(long)]
        tag: Option<String>,
        /// Case-insensitive match on title or url
        #[arg(long)]
        search: Option<String>,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = linkshelf_client::controller::DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
    /// Save a new bookmark. Without --title the page title is looked up.
    Add {
        url: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Change fields of an existing bookmark
    Edit {
        id: String,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Replace the tag list with an empty one
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,
    },
    /// Delete a bookmark
    Delete { id: String },
    /// Look up the title of a page
    Title { url: String },
    /// Show or change the dark-mode preference
    DarkMode {
        #[arg(value_enum)]
        mode: Option<DarkModeSetting>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DarkModeSetting {
    On,
    Off,
    Toggle,
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_bookmark(bookmark: &Bookmark) {
    println!("{}  {}", bookmark.id, bookmark.title);
    println!("    {}", bookmark.url);
    if let Some(description) = bookmark.description.as_deref().filter(|d| !d.is_empty()) {
        println!("    {description}");
    }
    if let Some(tags) = bookmark.tags.as_ref().filter(|t| !t.is_empty()) {
        let tags: Vec<_> = tags.iter().map(|t| format!("#{t}")).collect();
        println!("    {}", tags.join(" "));
    }
    println!(
        "    saved {}",
        bookmark.created_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
    );
}

fn fail(message: &str) -> ExitCode {
    eprintln!("error: {message}");
    ExitCode::FAILURE
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    let api = match HttpBookmarkApi::new(&args.server) {
        Ok(api) => api,
        Err(e) => return fail(&e.to_string()),
    };
    let mut controller = match BookmarkController::new(api).with_preferences_file(&args.preferences) {
        Ok(controller) => controller,
        Err(e) => return fail(&e.to_string()),
    };

    match args.command {
        Command::List {
            tag,
            search,
            page,
            page_size,
        } => {
            controller = controller.with_page_size(page_size);
            if !controller.set_tag_filter(tag.as_deref()).await {
                return fail(controller.error().unwrap_or("request failed"));
            }
            if let Some(search) = search {
                controller.set_search(search);
            }
            controller.set_page(page.saturating_sub(1));

            let theme = if controller.dark_mode() { "dark" } else { "light" };
            for bookmark in controller.visible() {
                print_bookmark(bookmark);
            }
            println!(
                "-- page {}/{} ({} matching, {} theme)",
                controller.page() + 1,
                controller.page_count().max(1),
                controller.filtered().len(),
                theme
            );
        }
        Command::Add {
            url,
            title,
            description,
            tags,
        } => {
            let title = match title {
                Some(title) => Some(title),
                None => controller.fetch_title(&url).await,
            };
            let mut payload = BookmarkPayload {
                url: Some(url),
                title,
                description,
                ..Default::default()
            };
            if !tags.is_empty() {
                payload = payload.with_tags(tags);
            }
            match controller.create(payload).await {
                Some(created) => print_bookmark(&created),
                None => return fail(controller.error().unwrap_or("request failed")),
            }
        }
        Command::Edit {
            id,
            url,
            title,
            description,
            tags,
            clear_tags,
        } => {
            let mut payload = BookmarkPayload {
                url,
                title,
                description,
                ..Default::default()
            };
            if clear_tags || !tags.is_empty() {
                payload = payload.with_tags(tags);
            }
            match controller.update(&id, payload).await {
                Some(updated) => print_bookmark(&updated),
                None => return fail(controller.error().unwrap_or("request failed")),
            }
        }
        Command::Delete { id } => match controller.delete(&id).await {
            Some(removed) => println!("Deleted \"{}\" ({})", removed.title, removed.url),
            None => return fail(controller.error().unwrap_or("request failed")),
        },
        Command::Title { url } => match controller.fetch_title(&url).await {
            Some(title) => println!("{title}"),
            None => println!("(no title available)"),
        },
        Command::DarkMode { mode } => {
            let result = match mode {
                None => Ok(controller.dark_mode()),
                Some(DarkModeSetting::On) => controller.set_dark_mode(true).map(|_| true),
                Some(DarkModeSetting::Off) => controller.set_dark_mode(false).map(|_| false),
                Some(DarkModeSetting::Toggle) => controller.toggle_dark_mode(),
            };
            match result {
                Ok(enabled) => println!("dark mode: {}", if enabled { "on" } else { "off" }),
                Err(e) => return fail(&e.to_string()),
            }
        }
    }

    ExitCode::SUCCESS
}
