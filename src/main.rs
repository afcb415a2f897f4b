use clap::{Parser, Subcommand};
use recipe_finder::cli::{parse_command, Command, HELP};
use recipe_finder::config::load_config;
use recipe_finder::render::{self, html, text};
use recipe_finder::{
    open_app, open_favorites, App, DietTag, EdamamClient, FileStore, HealthTag, ResultsState,
};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "recipe-finder", version, about = "Search recipes and keep favorites")]
struct Args {
    /// Path to a TOML config file (defaults to ./config.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run a single search and print the results
    Search {
        query: String,
        #[arg(long)]
        diet: Option<DietTag>,
        #[arg(long)]
        health: Option<HealthTag>,
        /// Print HTML instead of plain text
        #[arg(long)]
        html: bool,
    },
    /// Print saved favorites
    Favorites {
        #[arg(long)]
        html: bool,
    },
    /// Interactive session (default)
    Shell,
}

type RecipeApp = App<EdamamClient, FileStore>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    match args.command.unwrap_or(Cmd::Shell) {
        Cmd::Search {
            query,
            diet,
            health,
            html: as_html,
        } => {
            let mut app = open_app(&config)?;
            app.set_diet(diet);
            app.set_health(health);
            if !app.submit_search(&query).await {
                return Err("Search text cannot be empty".into());
            }
            let page = render::page_view(&app);
            if as_html {
                println!("{}", html::render_results(&page.results));
            } else {
                print!("{}", text::render_results(&page.results));
            }
            if matches!(app.results(), ResultsState::Failed { .. }) {
                std::process::exit(1);
            }
        }
        Cmd::Favorites { html: as_html } => {
            let view = render::favorites_view(&open_favorites(&config));
            if as_html {
                println!("{}", html::render_favorites(&view));
            } else {
                print!("{}", text::render_favorites(&view));
            }
        }
        Cmd::Shell => run_shell(&mut open_app(&config)?).await?,
    }

    Ok(())
}

async fn run_shell(app: &mut RecipeApp) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}\n", HELP);
    print!("{}", text::render_page(&render::page_view(app)));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            Command::Search(query) => {
                app.submit_search(&query).await;
            }
            Command::Diet(diet) => {
                if let Some(request) = app.set_diet(diet) {
                    app.run_fetch(request).await;
                }
            }
            Command::Health(health) => {
                if let Some(request) = app.set_health(health) {
                    app.run_fetch(request).await;
                }
            }
            Command::Open(index) => {
                if !app.open_detail(index) {
                    println!("No result #{}", index + 1);
                }
            }
            Command::Save => {
                if app.toggle_favorite().is_none() {
                    println!("Open a recipe first");
                }
            }
            Command::Close => app.close_detail(),
            Command::Favorites => app.open_favorites(),
            Command::FavOpen(index) => {
                if !app.open_favorite(index) {
                    println!("No favorite #{}", index + 1);
                }
            }
            Command::FavRemove(index) => {
                if !app.remove_favorite(index) {
                    println!("No favorite #{}", index + 1);
                }
            }
            Command::FavClose => app.close_favorites(),
            Command::Explore => {
                app.explore();
                print!("{}", text::render_filters(&render::page_view(app)));
                continue;
            }
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Quit => break,
        }

        print!("{}", text::render_page(&render::page_view(app)));
    }

    Ok(())
}
