use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use face_iterable_core::detection::domain::face_detector::FaceDetector;
use face_iterable_core::detection::domain::face_extractor::FaceExtractor;
use face_iterable_core::detection::domain::face_landmarks::LandmarkCategory;
use face_iterable_core::detection::infrastructure::model_resolver;
use face_iterable_core::detection::infrastructure::onnx_face_detector::OnnxFaceDetector;
use face_iterable_core::detection::infrastructure::onnx_landmark_detector::OnnxLandmarkDetector;
use face_iterable_core::detection::infrastructure::onnx_yolo_detector::{
    OnnxYoloDetector, DEFAULT_CONFIDENCE,
};
use face_iterable_core::imaging::infrastructure::http_image_fetcher::HttpImageFetcher;
use face_iterable_core::imaging::infrastructure::image_file_writer::ImageFileWriter;
use face_iterable_core::iterable::infrastructure::json_iterable_writer::JsonIterableWriter;
use face_iterable_core::pipeline::create_iterable_use_case::{
    CreateIterableRequest, CreateIterableUseCase,
};
use face_iterable_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use face_iterable_core::pipeline::visualize_items_use_case::VisualizeItemsUseCase;
use face_iterable_core::search::domain::photo::{Orientation, PhotoSize, SearchOptions};
use face_iterable_core::search::infrastructure::pexels_client::PexelsClient;
use face_iterable_core::shared::constants::{
    DEFAULT_API_KEYS_PATH, DEFAULT_DEBUG_DIR, DEFAULT_OUTPUT_PATH, DEFAULT_QUERY,
    LANDMARK_MODEL_NAME, LANDMARK_MODEL_URL, MAX_PER_PAGE, YOLO_MODEL_NAME, YOLO_MODEL_URL,
};
use face_iterable_core::shared::credentials::ApiKeys;

/// Builds a face iterable from stock photo search results.
#[derive(Parser)]
#[command(name = "create-iterable")]
struct Cli {
    /// Search query.
    #[arg(short, long, default_value = DEFAULT_QUERY)]
    query: String,

    /// Number of photos to fetch (max 80).
    #[arg(short, long, default_value_t = MAX_PER_PAGE)]
    count: u32,

    /// Landmark categories to rank by, in priority order (e.g. left_eye nose_tip).
    #[arg(long = "sort_by_landmarks", num_args = 0.., value_delimiter = ',')]
    sort_by_landmarks: Vec<LandmarkCategory>,

    /// Output JSON path.
    #[arg(short, long = "output_path", default_value = DEFAULT_OUTPUT_PATH)]
    output_path: PathBuf,

    /// Save images with the detected face box drawn on them.
    #[arg(short, long)]
    debug: bool,

    /// Directory for debug images.
    #[arg(long = "debug_dir", default_value = DEFAULT_DEBUG_DIR)]
    debug_dir: PathBuf,

    /// Photo orientation: landscape, portrait or square.
    #[arg(long, value_parser = parse_orientation)]
    orientation: Option<Orientation>,

    /// Minimum photo size: large, medium or small.
    #[arg(long, value_parser = parse_size)]
    size: Option<PhotoSize>,

    /// Desired photo color (name or hex code).
    #[arg(long)]
    color: Option<String>,

    /// Search locale (e.g. en-US).
    #[arg(long)]
    locale: Option<String>,

    /// Results page to request.
    #[arg(long)]
    page: Option<u32>,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f64,

    /// Directory with bundled model files, checked before downloading.
    #[arg(long = "model_dir")]
    model_dir: Option<PathBuf>,

    /// Local 68-point landmark model, bypassing model resolution.
    #[arg(long = "landmark_model")]
    landmark_model: Option<PathBuf>,

    /// JSON file holding the search provider API key.
    #[arg(long = "api_keys", default_value = DEFAULT_API_KEYS_PATH)]
    api_keys: PathBuf,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("{}", error_report(e.as_ref()));
        process::exit(1);
    }
}

/// `Error: {e}` followed by one `caused by:` line per source.
fn error_report(e: &dyn Error) -> String {
    let mut report = format!("Error: {e}");
    let mut source = e.source();
    while let Some(cause) = source {
        report.push_str(&format!("\n  caused by: {cause}"));
        source = cause.source();
    }
    report
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let keys = ApiKeys::load(&cli.api_keys)?;
    let detector = build_detector(&cli)?;

    let request = CreateIterableRequest {
        search: search_options(&cli),
        sort_by: cli.sort_by_landmarks.clone(),
        output_path: cli.output_path.clone(),
    };
    let mut create = CreateIterableUseCase::new(
        Box::new(PexelsClient::new(&keys)),
        Box::new(HttpImageFetcher::new()),
        FaceExtractor::new(detector),
        Box::new(JsonIterableWriter::new()),
        Box::new(StdoutPipelineLogger::new()),
    );
    let iterable = create.execute(&request)?;

    if cli.debug {
        let mut visualize = VisualizeItemsUseCase::new(
            Box::new(HttpImageFetcher::new()),
            Box::new(ImageFileWriter::new()),
            Box::new(StdoutPipelineLogger::new()),
        );
        visualize.execute(&iterable.iterable, &cli.debug_dir)?;
    }

    Ok(())
}

fn search_options(cli: &Cli) -> SearchOptions {
    let mut options = SearchOptions::new(cli.query.clone()).with_per_page(cli.count);
    options.orientation = cli.orientation;
    options.size = cli.size;
    options.color = cli.color.clone();
    options.locale = cli.locale.clone();
    options.page = cli.page;
    options
}

fn build_detector(cli: &Cli) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    let bundled = cli.model_dir.as_deref();

    let yolo_path = model_resolver::resolve(
        YOLO_MODEL_NAME,
        YOLO_MODEL_URL,
        bundled,
        Some(Box::new(|d, t| download_progress("face detection", d, t))),
    )?;
    eprintln!();

    let landmark_path = match &cli.landmark_model {
        Some(path) => path.clone(),
        None => {
            let path = model_resolver::resolve(
                LANDMARK_MODEL_NAME,
                LANDMARK_MODEL_URL,
                bundled,
                Some(Box::new(|d, t| download_progress("landmark", d, t))),
            )?;
            eprintln!();
            path
        }
    };

    let boxes = OnnxYoloDetector::new(&yolo_path, cli.confidence)?;
    let landmarks = OnnxLandmarkDetector::new(&landmark_path)?;
    Ok(Box::new(OnnxFaceDetector::new(boxes, landmarks)))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.query.trim().is_empty() {
        return Err("Query must not be empty".into());
    }
    if !(1..=MAX_PER_PAGE).contains(&cli.count) {
        return Err(format!("Count must be between 1 and {MAX_PER_PAGE}, got {}", cli.count).into());
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if let Some(page) = cli.page {
        if page == 0 {
            return Err("Page numbers start at 1".into());
        }
    }
    if let Some(path) = &cli.landmark_model {
        if !path.exists() {
            return Err(format!("Landmark model not found: {}", path.display()).into());
        }
    }
    Ok(())
}

fn parse_orientation(value: &str) -> Result<Orientation, String> {
    Orientation::parse(value)
        .ok_or_else(|| format!("expected landscape, portrait or square, got '{value}'"))
}

fn parse_size(value: &str) -> Result<PhotoSize, String> {
    PhotoSize::parse(value).ok_or_else(|| format!("expected large, medium or small, got '{value}'"))
}

fn download_progress(model: &str, downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading {model} model... {pct}%");
    } else {
        eprint!("\rDownloading {model} model... {downloaded} bytes");
    }
}
