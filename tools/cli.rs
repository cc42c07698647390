//! `koala-highlight`: highlights a Koala source file in the terminal or as HTML.
//!
//! - `koala-highlight main.koala` - Print the file with ANSI colors
//! - `koala-highlight main.koala --format html --line-numbers` - Print an HTML page
//! - `koala-highlight --dump-grammar` - Print the Koala rule table as JSON
//! - `koala-highlight --dump-theme --theme light` - Print a theme as JSON

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use koala_highlight::koala::{self, DARK_THEME_NAME, LANGUAGE_ID, LIGHT_THEME_NAME};
use koala_highlight::{
    HighlightOptions, HtmlRenderer, KOALA_CSS, Registry, RenderOptions, TerminalRenderer,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeChoice {
    Dark,
    Light,
}

impl ThemeChoice {
    fn name(self) -> &'static str {
        match self {
            ThemeChoice::Dark => DARK_THEME_NAME,
            ThemeChoice::Light => LIGHT_THEME_NAME,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Terminal,
    Html,
}

#[derive(Parser)]
#[command(name = "koala-highlight", version, about = "Highlight Koala source code")]
struct Cli {
    /// Koala source file to highlight
    #[arg(required_unless_present_any = ["dump_grammar", "dump_theme"])]
    file: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "dark")]
    theme: ThemeChoice,

    #[arg(long, value_enum, default_value = "terminal")]
    format: Format,

    /// Show line numbers
    #[arg(long = "line-numbers")]
    line_numbers: bool,

    /// Paint the theme background in the terminal
    #[arg(long)]
    background: bool,

    /// Print the Koala grammar description as JSON and exit
    #[arg(long = "dump-grammar")]
    dump_grammar: bool,

    /// Print the selected theme description as JSON and exit
    #[arg(long = "dump-theme")]
    dump_theme: bool,
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.dump_grammar {
        println!("{}", koala::grammar().to_json()?);
    }
    if cli.dump_theme {
        let theme = match cli.theme {
            ThemeChoice::Dark => koala::dark_theme(),
            ThemeChoice::Light => koala::light_theme(),
        };
        println!("{}", theme.to_json()?);
    }
    let Some(path) = cli.file else {
        return Ok(());
    };

    let content = fs::read_to_string(&path)?;
    let mut registry = Registry::default();
    koala::register(&mut registry)?;

    let options = HighlightOptions::new(LANGUAGE_ID, cli.theme.name());
    let highlighted = registry.highlight(&content, &options)?;
    let render_options = RenderOptions {
        show_line_numbers: cli.line_numbers,
        ..Default::default()
    };

    match cli.format {
        Format::Terminal => {
            let renderer = TerminalRenderer {
                with_background: cli.background,
            };
            println!("{}", renderer.render(&highlighted, &render_options));
        }
        Format::Html => {
            let code = HtmlRenderer.render(&highlighted, &render_options);
            println!(
                "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{KOALA_CSS}</style>\n</head>\n<body>\n{code}\n</body>\n</html>",
                path.display()
            );
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
