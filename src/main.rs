//! chatmask - chat mask registry and toolkit
//!
//! This is the main entry point for the chatmask binary. It exposes the
//! built-in mask registry, validation for user-authored mask files, the
//! bundled model catalog, and prompt template rendering.

mod cli;
mod config;
mod error;
mod logging;
mod mask;
mod models;
mod prompt;
mod version;

use std::path::Path;

use clap::Parser;
use tracing::{debug, warn};

use crate::cli::{Cli, Commands, ConfigSubcommand, MaskSubcommand, ModelsSubcommand};
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::mask::validate::ValidationReport;
use crate::mask::{MaskLoader, MaskRegistry};
use crate::models::ModelCatalog;

fn main() {
    // Parse CLI arguments first (before logging, so we know verbosity)
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    // Commands that don't need full logging or config
    match &cli.command {
        Commands::Version => {
            version::print_version();
            return Ok(());
        }
        Commands::Config { subcommand } => {
            // Config commands use minimal logging
            logging::init_simple(tracing::Level::WARN)?;
            return handle_config_command(cli.config.as_deref(), subcommand.clone());
        }
        _ => {}
    }

    // Load config (or use defaults)
    let config = AppConfig::load(cli.config.as_deref())?;

    // Initialize logging with config settings
    // The guards must be kept alive for the lifetime of the program
    let _log_guards = logging::init_logging(&config.logging, cli.verbose, cli.quiet)?;

    debug!(
        version = %version::build_info().full_version(),
        default_lang = %config.registry.default_lang,
        mask_dir = %config.masks.dir,
        "Starting chatmask"
    );

    match cli.command {
        Commands::Mask { subcommand } => handle_mask_command(&config, subcommand),
        Commands::Models { subcommand } => handle_models_command(subcommand),
        Commands::Prompt {
            input,
            template,
            model,
            system,
        } => handle_prompt_command(&config, input, template, model, system),
        Commands::Version | Commands::Config { .. } => {
            // Already handled above
            unreachable!();
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Mask Commands
// ─────────────────────────────────────────────────────────────────

fn handle_mask_command(config: &AppConfig, subcommand: MaskSubcommand) -> Result<()> {
    match subcommand {
        MaskSubcommand::List { lang, json } => {
            let registry = MaskRegistry::builtin()?;
            let lang = lang.unwrap_or_else(|| config.registry.default_lang.clone());
            let masks = registry.list_by_language(&lang);

            if json {
                println!("{}", serde_json::to_string_pretty(&masks)?);
                return Ok(());
            }

            if masks.is_empty() {
                println!("No masks for language '{}'.", lang);
                return Ok(());
            }

            println!("Masks for language '{}':", lang);
            for mask in masks {
                println!(
                    "  {}  [{}]  {} seed message(s)",
                    mask.name,
                    mask.model_config.model,
                    mask.context.len()
                );
            }
            Ok(())
        }

        MaskSubcommand::Show { name, lang } => {
            let registry = MaskRegistry::builtin()?;
            let lang = lang.unwrap_or_else(|| config.registry.default_lang.clone());
            let mask = registry.get_by_name(&lang, &name)?;
            print_mask(mask);
            Ok(())
        }

        MaskSubcommand::Check { files } => {
            let loader = MaskLoader::new(config.mask_dir());
            let outcomes = if files.is_empty() {
                loader.check_all()?
            } else {
                let mut outcomes = Vec::new();
                for file in &files {
                    outcomes.push(loader.check_file(Path::new(file))?);
                }
                outcomes
            };

            if outcomes.is_empty() {
                println!("No mask files found in {}.", loader.mask_dir().display());
                return Ok(());
            }

            let mut checked = 0usize;
            let mut first_failure: Option<(String, ValidationReport)> = None;
            for outcome in &outcomes {
                checked += outcome.total;
                if outcome.passed() {
                    println!("{}: {} mask(s) OK", outcome.path.display(), outcome.total);
                    continue;
                }

                println!(
                    "{}: {} of {} mask(s) invalid",
                    outcome.path.display(),
                    outcome.failures.len(),
                    outcome.total
                );
                for (name, report) in &outcome.failures {
                    println!("  mask '{}':", name);
                    for issue in &report.issues {
                        println!("    - {}", issue);
                    }
                    if first_failure.is_none() {
                        first_failure = Some((name.clone(), report.clone()));
                    }
                }
            }

            match first_failure {
                None => {
                    println!(
                        "Checked {} mask(s) in {} file(s), all valid.",
                        checked,
                        outcomes.len()
                    );
                    Ok(())
                }
                Some((name, report)) => Err(Error::mask_invalid(name, report)),
            }
        }

        MaskSubcommand::Init {
            path,
            name,
            lang,
            force,
        } => {
            let lang = lang.unwrap_or_else(|| config.registry.default_lang.clone());
            MaskLoader::scaffold(Path::new(&path), &name, &lang, force)?;
            println!("Mask file created: {}", path);
            Ok(())
        }
    }
}

/// Print one mask in full
fn print_mask(mask: &mask::MaskPreset) {
    let catalog = ModelCatalog::bundled();

    if !catalog.contains(&mask.model_config.model) {
        warn!(
            model = %mask.model_config.model,
            "Model is not in the bundled catalog"
        );
    }

    println!("Name:     {}", mask.name);
    println!("Avatar:   {}", mask.avatar);
    println!("Language: {}", mask.lang);
    println!("Builtin:  {}", mask.builtin);
    if let Some(ts) = mask.created_at_utc() {
        println!("Created:  {}", ts.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    let mc = &mask.model_config;
    println!();
    println!("Model config:");
    println!("  model:              {}", mc.model);
    println!("  knowledge cutoff:   {}", catalog.knowledge_cutoff(&mc.model));
    println!("  temperature:        {}", mc.temperature);
    println!("  max_tokens:         {}", mc.max_tokens);
    println!("  presence_penalty:   {}", mc.presence_penalty);
    println!("  frequency_penalty:  {}", mc.frequency_penalty);
    println!("  send memory:        {}", mc.send_memory);
    println!("  history messages:   {}", mc.history_message_count);
    println!("  compress threshold: {}", mc.compress_message_length_threshold);

    println!();
    println!("Context ({} message(s)):", mask.context.len());
    for msg in &mask.context {
        println!("  [{}] {}: {}", msg.id, msg.role, msg.content);
    }
}

// ─────────────────────────────────────────────────────────────────
// Model Catalog Commands
// ─────────────────────────────────────────────────────────────────

fn handle_models_command(subcommand: ModelsSubcommand) -> Result<()> {
    let catalog = ModelCatalog::bundled();

    match subcommand {
        ModelsSubcommand::List => {
            println!("Bundled models:");
            for entry in catalog.entries() {
                println!(
                    "  {}  provider={}  available={}  cutoff={}",
                    entry.name,
                    entry.provider,
                    entry.available,
                    catalog.knowledge_cutoff(entry.name)
                );
            }
            Ok(())
        }

        ModelsSubcommand::Show { model } => {
            let entry = catalog.get(&model)?;
            println!("Name:             {}", entry.name);
            println!(
                "Provider:         {} (id: {})",
                entry.provider,
                entry.provider.id()
            );
            println!("Available:        {}", entry.available);
            println!("Knowledge cutoff: {}", catalog.knowledge_cutoff(entry.name));
            println!(
                "Summarize via:    {}",
                ModelCatalog::summarize_model(entry.name)
            );
            Ok(())
        }

        ModelsSubcommand::Cutoff { model } => {
            let cutoff = catalog.knowledge_cutoff(&model);
            if catalog.has_cutoff(&model) {
                println!("{}: {}", model, cutoff);
            } else {
                println!("{}: {} (default)", model, cutoff);
            }
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Prompt Command
// ─────────────────────────────────────────────────────────────────

fn handle_prompt_command(
    config: &AppConfig,
    input: String,
    template: Option<String>,
    model: Option<String>,
    system: bool,
) -> Result<()> {
    let vars = prompt::TemplateVars {
        input,
        model: model.unwrap_or_else(|| models::DEFAULT_MODEL.to_string()),
        lang: config.registry.default_lang.clone(),
        time: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };

    if system {
        println!("{}", prompt::fill(prompt::DEFAULT_SYSTEM_TEMPLATE, &vars));
    }

    let template = template.unwrap_or_else(|| prompt::DEFAULT_INPUT_TEMPLATE.to_string());
    println!("{}", prompt::fill(&template, &vars));
    Ok(())
}

// ─────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────

fn handle_config_command(
    explicit_path: Option<&str>,
    subcommand: ConfigSubcommand,
) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show => {
            let cfg = AppConfig::load(explicit_path)?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            config::init_config(path.as_deref(), force)?;
        }
        ConfigSubcommand::Validate => match AppConfig::load(explicit_path) {
            Ok(_) => {
                println!("Configuration is valid.");
            }
            Err(e) => {
                eprint!("{}", e.format_for_terminal());
                std::process::exit(e.exit_code());
            }
        },
    }

    Ok(())
}
