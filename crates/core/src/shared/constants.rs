pub const PEXELS_API_URL: &str = "https://api.pexels.com/v1";

/// Provider ceiling for `per_page`.
pub const MAX_PER_PAGE: u32 = 80;

pub const DEFAULT_QUERY: &str = "happy portrait face";
pub const DEFAULT_OUTPUT_PATH: &str = "src/iterables/iterable.json";
pub const DEFAULT_DEBUG_DIR: &str = "scripts/debug";
pub const DEFAULT_API_KEYS_PATH: &str = "api_keys.json";

/// Key under which the search provider's API key is stored in the credentials file.
pub const PEXELS_CREDENTIALS_KEY: &str = "pexels";
pub const PEXELS_API_KEY_ENV: &str = "PEXELS_API_KEY";

pub const YOLO_MODEL_NAME: &str = "yolo11n-pose_widerface.onnx";
pub const YOLO_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/yolo11n-pose_widerface.onnx";

/// 68-point 2D/3D landmark regressor from the InsightFace `buffalo_l` pack.
pub const LANDMARK_MODEL_NAME: &str = "1k3d68.onnx";
pub const LANDMARK_MODEL_URL: &str =
    "https://huggingface.co/public-data/insightface/resolve/main/models/buffalo_l/1k3d68.onnx";

pub const DEBUG_IMAGE_EXTENSION: &str = "png";
