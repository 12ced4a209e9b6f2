use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::Read;

use chat_text_utils::linkopen::{self, BrowserPrefs, Outcome, SystemNavigator};
use chat_text_utils::richtext::{self, StyledText};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a URL in the default browser, or a custom tab when preferred
    OpenLink {
        url: String,

        #[arg(long, env = "CHAT_CUSTOM_TABS")]
        custom_tabs: bool,

        #[arg(long, default_value_t = 0x2b90d9)]
        toolbar_color: u32,
    },

    /// Print an HTML message body as styled-text JSON
    DecodeHtml { html: String },

    /// Read styled-text JSON from stdin, print the canonical HTML body
    EncodeHtml,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::OpenLink {
            url,
            custom_tabs,
            toolbar_color,
        } => command_open_link(&url, custom_tabs, toolbar_color),
        Commands::DecodeHtml { html } => command_decode_html(&html),
        Commands::EncodeHtml => command_encode_html(),
    }
}

fn command_open_link(
    url: &str,
    custom_tabs: bool,
    toolbar_color: u32,
) -> Result<(), Box<dyn Error>> {
    let prefs = BrowserPrefs {
        use_custom_tabs: custom_tabs,
    };

    match linkopen::open_link(url, &prefs, toolbar_color, &SystemNavigator)? {
        Outcome::CustomTab { package } => {
            println!("Opened in custom tab host {package}.");
        }
        Outcome::Browser => {
            println!("Opened in the default browser.");
        }
        Outcome::Undeliverable => {
            println!("No browser could open the link.");
        }
    }

    Ok(())
}

fn command_decode_html(html: &str) -> Result<(), Box<dyn Error>> {
    let text = richtext::from_html(html);
    println!("{}", serde_json::to_string_pretty(&text)?);
    Ok(())
}

fn command_encode_html() -> Result<(), Box<dyn Error>> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let text: StyledText = serde_json::from_str(&input)?;
    println!("{}", richtext::to_html(&text));
    Ok(())
}
