//! Prismo template CLI
//!
//! Usage:
//!   prismo-template [OPTIONS] [TEMPLATE]
//!
//! Options:
//!   -c, --colors <FILE>   Palette file (TOML stylesheet or pywal colors.json)
//!   -t, --target <PATH>   Target file to patch (overrides @target in the template)
//!   -n, --dry-run         Print the patched result instead of writing
//!   -g, --grammar         Show directive language reference
//!   -h, --help            Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use prismo_template::engine::{resolve_target, target::load_buffer};
use prismo_template::{apply, render, Palette, PaletteError};

#[derive(Parser)]
#[command(name = "prismo-template")]
#[command(about = "Palette-driven template engine for patching config files")]
struct Cli {
    /// Template file (reads from stdin if not provided)
    template: Option<PathBuf>,

    /// Palette file: TOML stylesheet or pywal colors.json
    /// (defaults to ~/.cache/wal/colors.json when present)
    #[arg(short, long)]
    colors: Option<PathBuf>,

    /// Target file to patch (overrides the template's @target marker)
    #[arg(short, long)]
    target: Option<String>,

    /// Print the patched result to stdout instead of writing the target
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show directive language reference
    #[arg(short, long)]
    grammar: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.grammar {
        print_grammar();
        return;
    }

    // If no template file and stdin is a terminal (interactive), show intro help
    if cli.template.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Read template source
    let source = match &cli.template {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading template '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let palette = match load_palette(&cli) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error loading palette: {}", e);
            std::process::exit(1);
        }
    };

    // The engine ignores unknown directives, so templates carry their own
    // destination in a @target marker the CLI reads out here.
    let target = match cli.target.clone().or_else(|| template_target(&source)) {
        Some(target) => target,
        None => {
            eprintln!(
                "Error: no target given; pass --target or add a '@target <path>' line to the template"
            );
            std::process::exit(1);
        }
    };

    if cli.dry_run {
        let existing = match resolve_target(&target).and_then(|path| load_buffer(&path)) {
            Ok(buffer) => buffer.into_text(),
            Err(e) => {
                eprintln!("Error reading target '{}': {}", target, e);
                std::process::exit(1);
            }
        };
        match render(&source, &palette, &existing) {
            Ok(patched) => println!("{}", patched),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else if let Err(e) = apply(&source, &palette, &target) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Pick the palette source: an explicit file, the pywal cache, or the gray
/// placeholder palette when no colors have been generated yet.
fn load_palette(cli: &Cli) -> Result<Palette, PaletteError> {
    if let Some(path) = &cli.colors {
        return Palette::from_file(path);
    }
    if let Some(cache) = dirs::home_dir().map(|home| home.join(".cache/wal/colors.json")) {
        if cache.is_file() {
            return Palette::from_file(&cache);
        }
    }
    Ok(Palette::gray())
}

/// Extract the caller-level `@target <path>` marker from a template source.
fn template_target(source: &str) -> Option<String> {
    source.lines().find_map(|line| {
        let rest = line.strip_prefix('@')?;
        let (name, args) = rest.split_once(char::is_whitespace)?;
        if name.eq_ignore_ascii_case("target") {
            let args = args.trim();
            (!args.is_empty()).then(|| args.to_string())
        } else {
            None
        }
    })
}

fn print_intro() {
    println!(
        r#"Prismo Template - palette-driven patching of config files

USAGE:
    prismo-template [OPTIONS] [TEMPLATE]
    echo '<template>' | prismo-template --target <PATH>

OPTIONS:
    -c, --colors <FILE>   Palette file (TOML stylesheet or pywal colors.json)
    -t, --target <PATH>   Target file to patch (overrides @target)
    -n, --dry-run         Print the patched result instead of writing
    -g, --grammar         Show directive language reference
    -h, --help            Print help

QUICK START:
    printf '@match "theme"\ntheme = {{color2}}\n' | prismo-template -t ~/.config/app.conf

This rewrites every line containing "theme" with the palette's color2.
Run --grammar for the directive reference."#
    );
}

fn print_grammar() {
    println!(
        r#"PRISMO TEMPLATE GRAMMAR
=======================

DIRECTIVES
----------
@full               Replace the whole target with the content block
@line N             Overwrite line N (1-based; pads with empty lines)
@lines A-B          Overwrite the inclusive range A-B (length may change)
@match "regex"      Replace every line matching the pattern
@append             Add the content block at the end
@prepend            Insert the content block at the start

Directive names are case-insensitive. Everything after a directive line up
to the next '@' line is its content block; trailing blank lines are
dropped. Unknown directives (such as '@target <path>') are ignored by the
engine and may carry caller metadata.

Lines outside content blocks that are empty or start with '#' are comments.

MATCHING
--------
@match uses unanchored substring search per line; anchor the pattern
(^...$) for full-line matching. Replaced lines are never re-scanned.

SUBSTITUTION TOKENS
-------------------
{{name}}      Bare hex value, '#' stripped       ff8800
{{name.r}}    Red channel, decimal 0-255         255
{{name.g}}    Green channel                      136
{{name.b}}    Blue channel                       0
{{name.h}}    Hue in degrees (no unit)           32
{{name.l}}    Lightness percentage               50%
{{name.s}}    Saturation percentage              100%

Tokens with no palette entry are left untouched.

EXAMPLE
-------
# Xresources accent colors
@target ~/.Xresources

@match "^\*.foreground"
*.foreground: #{{foreground}}

@append
*.color4: #{{color4}}"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_target_found() {
        let source = "# comment\n@target ~/.config/app.conf\n@append\nx";
        assert_eq!(
            template_target(source),
            Some("~/.config/app.conf".to_string())
        );
    }

    #[test]
    fn test_template_target_case_insensitive() {
        assert_eq!(template_target("@TARGET /tmp/x"), Some("/tmp/x".to_string()));
    }

    #[test]
    fn test_template_target_missing() {
        assert_eq!(template_target("@append\nx"), None);
        assert_eq!(template_target("@target"), None);
        assert_eq!(template_target("@target   "), None);
    }
}
