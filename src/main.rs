use clap::Parser;
use pet_age::core::age::round_for_display;
use pet_age::core::guide::parse_sections;
use pet_age::core::profiles::{all_profiles, OTHER_BREED};
use pet_age::core::ConfigProvider;
use pet_age::utils::error::ErrorSeverity;
use pet_age::utils::{logger, validation::Validate};
use pet_age::{
    CliConfig, ConversionReport, Converter, HttpGuideClient, PetAgeError, TomlConfig,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    if cli.list_breeds {
        print_breed_options();
        return;
    }

    let outcome = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(mut file_config) => {
                    file_config.apply_cli_overrides(&cli);
                    run(&file_config, &cli).await
                }
                Err(e) => Err(e),
            }
        }
        None => run(&cli, &cli).await,
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run<C: ConfigProvider + Validate>(config: &C, cli: &CliConfig) -> Result<(), PetAgeError> {
    config.validate()?;

    let converter = Converter::<HttpGuideClient>::from_config(config)?;
    let report = converter.submit(&cli.form_input()).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, config.display_decimals());
    }

    Ok(())
}

fn print_report(report: &ConversionReport, decimals: usize) {
    let breed = match (report.breed.is_empty(), report.size_class) {
        (true, _) => String::new(),
        (false, Some(size)) => format!(" ({}, {} breed)", report.breed, size.label()),
        (false, None) => format!(" ({})", report.breed),
    };

    println!("🐾 {}{}, {} years old", report.species, breed, report.age);
    println!(
        "   ≈ {:.*} human years",
        decimals,
        round_for_display(report.human_age, decimals)
    );
    println!("   Typical lifespan: {}", report.lifespan);
    println!();

    for section in parse_sections(report.guide.text()) {
        if let Some(title) = &section.title {
            println!("▸ {}", title);
        }
        println!("{}", section.body);
        println!();
    }

    if report.guide.is_fallback() {
        println!("ℹ️  Showing standard guidance; the personalised guide was not available.");
    }
}

fn print_breed_options() {
    for profile in all_profiles() {
        println!(
            "{} ({}), typical lifespan {}",
            profile.display_name,
            profile.species,
            profile.typical_lifespan
        );
        for breed in profile.breed_options {
            println!("  - {}", breed);
        }
        println!("  - {} (use --custom-breed)", OTHER_BREED);
    }
}
