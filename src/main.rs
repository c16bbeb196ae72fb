use anyhow::Result;
use clap::Parser;
use img2text::common::init_logger;
use img2text::image2text::{OcrConfig, OcrModel, RecognitionLevel};
use img2text::process::{extract_text, render_outcome, OcrReport, OutputOptions};
use log::LevelFilter;
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about = "A CLI tool to print the text found in an image", long_about = None)]
struct Cli {
    #[arg(help = "input file in image (png, jpeg, gif, webp, tiff, bmp, etc) format")]
    image: PathBuf,
    #[arg(long, value_parser = ["default", "native", "tesseract"], help = "OCR engine to use")]
    model: Option<String>,
    #[arg(long, value_parser = ["accurate", "fast"], help = "recognition level")]
    level: Option<String>,
    #[arg(long, value_delimiter = ',', help = "comma separated recognition languages")]
    languages: Vec<String>,
    #[arg(long, help = "let the engine correct recognized words with a language model")]
    language_correction: bool,
    #[arg(long, conflicts_with = "language_correction", help = "disable the engine's language correction")]
    no_language_correction: bool,
    #[arg(long, help = "prefix each line with its normalized top-left coordinates")]
    bounding_boxes: bool,
    #[arg(long, help = "wrap the recognized text in header and footer lines")]
    framed: bool,
    #[arg(long, help = "print a JSON report instead of plain text")]
    json: bool,
    #[arg(long, help = "JSON file with OCR settings, flags take precedence")]
    config: Option<PathBuf>,
    #[arg(short, long, help = "log progress to stderr")]
    verbose: bool,
}

impl Cli {
    fn ocr_config(&self) -> Result<OcrConfig> {
        let mut config = match &self.config {
            Some(path) => OcrConfig::from_json_file(path)?,
            None => OcrConfig::default(),
        };

        if let Some(model) = &self.model {
            config.ocr_model = OcrModel::from(model.as_str());
        }
        if let Some(level) = &self.level {
            config.recognition_level = RecognitionLevel::from(level.as_str());
        }
        if !self.languages.is_empty() {
            config.languages = self.languages.clone();
        }
        if self.language_correction {
            config.language_correction = Some(true);
        } else if self.no_language_correction {
            config.language_correction = Some(false);
        }
        if self.bounding_boxes {
            config.bounding_boxes = Some(true);
        }

        Ok(config)
    }

    fn output_options(&self, config: &OcrConfig) -> OutputOptions {
        OutputOptions {
            bounding_boxes: config
                .bounding_boxes
                .unwrap_or(OcrConfig::get_default_bounding_boxes()),
            framed: self.framed,
        }
    }
}

async fn run(cli: &Cli) -> Result<i32> {
    let config = cli.ocr_config()?;
    log::debug!("OCR config: {:?}", config);

    let outcome = extract_text(&cli.image, &config).await;
    if let Err(e) = &outcome {
        log::info!("Failed to process OCR: {}", e);
    }

    if cli.json {
        let report = OcrReport::new(&cli.image, &config, &outcome);
        println!("{}", report.to_json()?);
    } else {
        println!("{}", render_outcome(&outcome, &cli.output_options(&config)));
    }

    Ok(outcome.as_ref().err().map_or(0, |e| e.exit_code()))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let exe_name = env::current_exe()
        .ok()
        .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| env!("CARGO_BIN_NAME").to_string());
    init_logger(
        exe_name,
        if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn },
    );

    let code = match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            println!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(code);
}
