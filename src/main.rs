// Identity card field extraction from images or recognized text

use clap::Parser;
use idscan::{
    models::{ExtractionResult, RecognitionBundle, Transcript},
    processing::RecognizerConfig,
    utils::IdScanError,
    IdCardPipeline,
};
use log::error;
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "idscan", about = "Extract structured fields from identity card scans")]
struct Args {
    /// Card image to recognize
    #[arg(required_unless_present = "text")]
    image: Option<PathBuf>,

    /// Directory holding the recognition language data
    #[arg(long)]
    tessdata: Option<PathBuf>,

    #[arg(long, default_value = "eng")]
    primary_lang: String,

    #[arg(long, default_value = "hin")]
    secondary_lang: String,

    /// Skip recognition and read the primary transcript from a file
    #[arg(long, conflicts_with = "image")]
    text: Option<PathBuf>,

    /// Secondary transcript to pair with --text
    #[arg(long, requires = "text")]
    secondary_text: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Print the script-tagged transcript
    #[arg(long)]
    diagnostics: bool,
}

fn print_report(result: &ExtractionResult, diagnostics: bool) {
    println!("\n===============================================");
    println!("        IDENTITY CARD EXTRACTION REPORT");
    println!("===============================================\n");

    println!("FIELDS:");
    println!("  Name:          {}", result.fields.name);
    println!("  Gender:        {}", result.fields.gender);
    println!("  Date of Birth: {}", result.fields.birth_date);
    println!("  ID Number:     {}", result.fields.masked_uid());
    println!("  Address:       {}", result.fields.address);

    if let Some(valid) = result.uid_checksum_valid {
        println!("  Check Digit:   {}", if valid { "OK" } else { "MISMATCH" });
    }

    println!("\nVALIDATION:");
    println!("  Score: {:.0}", result.verdict.score);
    println!("  {}", result.verdict.message);
    if !result.verdict.issues.is_empty() {
        println!("\nISSUES FOUND:");
        for issue in &result.verdict.issues {
            println!("  - {}", issue);
        }
    }

    if diagnostics && !result.diagnostic_transcript.is_empty() {
        println!("\nTAGGED TRANSCRIPT:");
        for line in result.diagnostic_transcript.lines() {
            println!("  {}", line);
        }
    }

    println!(
        "\nResult: {}",
        if result.is_valid() { "VALID" } else { "INVALID" }
    );
}

fn config_from_args(args: &Args) -> RecognizerConfig {
    let mut config = RecognizerConfig::from_env();
    if let Some(dir) = &args.tessdata {
        config.tessdata_dir = Some(dir.clone());
    }
    config.primary_language = args.primary_lang.clone();
    config.secondary_language = args.secondary_lang.clone();
    config
}

fn read_transcript(path: &PathBuf, language: &str) -> Result<Transcript, IdScanError> {
    let raw = fs::read_to_string(path)?;
    Ok(Transcript::from_text(language, &raw))
}

fn run_on_text(args: &Args, text_path: &PathBuf) -> Result<ExtractionResult, IdScanError> {
    let primary = read_transcript(text_path, &args.primary_lang)?;
    if primary.is_empty() {
        return Err(IdScanError::EmptyTranscript(format!(
            "{} contains no text",
            text_path.display()
        )));
    }
    let secondary = match &args.secondary_text {
        Some(path) => read_transcript(path, &args.secondary_lang)?,
        None => Transcript::from_text(&args.secondary_lang, ""),
    };
    Ok(IdCardPipeline::extract_from_bundle(&RecognitionBundle::new(
        primary, secondary,
    )))
}

#[cfg(feature = "tesseract")]
fn run_on_image(args: &Args, image_path: &PathBuf) -> Result<ExtractionResult, IdScanError> {
    let pipeline = IdCardPipeline::with_tesseract(&config_from_args(args))?;
    let result = pipeline.extract_path(image_path);
    pipeline.shutdown();
    Ok(result)
}

#[cfg(not(feature = "tesseract"))]
fn run_on_image(args: &Args, _image_path: &PathBuf) -> Result<ExtractionResult, IdScanError> {
    config_from_args(args).validate()?;
    Err(IdScanError::EngineUnavailable(
        "built without the `tesseract` feature; use --text".to_string(),
    ))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let outcome = match (&args.text, &args.image) {
        (Some(text_path), _) => run_on_text(&args, text_path),
        (None, Some(image_path)) => run_on_image(&args, image_path),
        (None, None) => Err(IdScanError::ConfigError("no input given".to_string())),
    };

    let result = match outcome {
        Ok(result) => result,
        Err(e @ IdScanError::ConfigError(_)) | Err(e @ IdScanError::EngineUnavailable(_)) => {
            error!("{}", e);
            process::exit(2);
        }
        Err(e) => ExtractionResult::from_error(&e),
    };

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize result: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_report(&result, args.diagnostics);
    }

    if !result.is_valid() {
        process::exit(1);
    }
}
