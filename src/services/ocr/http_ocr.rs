use super::engine::TextExtractor;
use super::preprocessing::PreprocessingService;
use crate::error::ExtractionError;
use crate::models::config::OcrConfig;
use crate::models::upload::UploadedImage;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Boxes overlapping more than this are treated as duplicates
const IOU_THRESHOLD: f64 = 0.3;

/// HTTP OCR client that talks to the OCR server
#[derive(Clone)]
pub struct HttpOcrClient {
    client: reqwest::Client,
    base_url: String,
    min_score: f64,
    preprocessing: Arc<PreprocessingService>,
}

#[derive(Serialize)]
struct ImageRequest {
    image_base64: String,
}

/// Single text box with bounding box coordinates
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct TextBox {
    /// Corner points [[x1,y1], [x2,y2], [x3,y3], [x4,y4]]
    #[serde(rename = "box")]
    pub bbox: Vec<[f64; 2]>,
    pub text: String,
    #[serde(default)]
    pub score: f64,
}

/// OCR response from the server
#[derive(Deserialize)]
struct OcrResponse {
    #[serde(default)]
    boxes: Vec<TextBox>,
    #[serde(default)]
    raw_text: String,
}

impl TextBox {
    /// Bounding box as (x_min, y_min, x_max, y_max)
    fn rect(&self) -> (f64, f64, f64, f64) {
        let mut x_min = f64::INFINITY;
        let mut y_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_max = f64::NEG_INFINITY;

        for [x, y] in &self.bbox {
            x_min = x_min.min(*x);
            x_max = x_max.max(*x);
            y_min = y_min.min(*y);
            y_max = y_max.max(*y);
        }

        (x_min, y_min, x_max, y_max)
    }

    fn is_valid(&self) -> bool {
        !self.bbox.is_empty() && !self.text.trim().is_empty()
    }

    /// Intersection over Union with another box
    fn iou(&self, other: &TextBox) -> f64 {
        let (x1_min, y1_min, x1_max, y1_max) = self.rect();
        let (x2_min, y2_min, x2_max, y2_max) = other.rect();

        let inter_x_min = x1_min.max(x2_min);
        let inter_y_min = y1_min.max(y2_min);
        let inter_x_max = x1_max.min(x2_max);
        let inter_y_max = y1_max.min(y2_max);

        if inter_x_max <= inter_x_min || inter_y_max <= inter_y_min {
            return 0.0;
        }

        let inter_area = (inter_x_max - inter_x_min) * (inter_y_max - inter_y_min);
        let union_area = self.area() + other.area() - inter_area;

        if union_area <= 0.0 {
            return 0.0;
        }

        inter_area / union_area
    }

    fn left_x(&self) -> f64 {
        self.rect().0
    }

    fn center_y(&self) -> f64 {
        let (_, y_min, _, y_max) = self.rect();
        (y_min + y_max) / 2.0
    }

    fn area(&self) -> f64 {
        let (x_min, y_min, x_max, y_max) = self.rect();
        (x_max - x_min) * (y_max - y_min)
    }
}

impl HttpOcrClient {
    pub fn new(config: &OcrConfig) -> Result<Self, ExtractionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
            min_score: config.min_score,
            preprocessing: Arc::new(PreprocessingService::new(config.preprocessing.clone())),
        })
    }

    /// Suppress overlapping boxes, keeping the larger of each overlapping pair
    fn filter_overlapping_boxes(boxes: Vec<TextBox>, iou_threshold: f64) -> Vec<TextBox> {
        let mut remaining = boxes;
        // Smallest first so pop() yields the largest
        remaining.sort_by(|a, b| a.area().total_cmp(&b.area()));

        let mut kept = Vec::new();
        while let Some(current) = remaining.pop() {
            remaining.retain(|other| current.iou(other) <= iou_threshold);
            kept.push(current);
        }

        kept
    }

    /// Group boxes into reading-order lines: top-to-bottom, then left-to-right
    fn group_into_lines(mut boxes: Vec<TextBox>) -> Vec<Vec<TextBox>> {
        boxes.sort_by(|a, b| a.center_y().total_cmp(&b.center_y()));

        let mut lines: Vec<Vec<TextBox>> = Vec::new();
        let mut anchor: Option<(f64, f64)> = None;

        for text_box in boxes {
            let center = text_box.center_y();
            match anchor {
                // Same line while the centre stays inside the first box's vertical span
                Some((top, bottom)) if center >= top && center <= bottom => {
                    if let Some(line) = lines.last_mut() {
                        line.push(text_box);
                    }
                }
                _ => {
                    let (_, top, _, bottom) = text_box.rect();
                    anchor = Some((top, bottom));
                    lines.push(vec![text_box]);
                }
            }
        }

        for line in &mut lines {
            line.sort_by(|a, b| a.left_x().total_cmp(&b.left_x()));
        }

        lines
    }

    /// Turn server boxes into newline-separated text
    pub fn process_ocr_boxes(boxes: Vec<TextBox>, min_score: f64) -> String {
        let boxes: Vec<TextBox> = boxes
            .into_iter()
            .filter(|b| b.is_valid() && b.score >= min_score)
            .collect();

        if boxes.is_empty() {
            return String::new();
        }

        let filtered = Self::filter_overlapping_boxes(boxes, IOU_THRESHOLD);

        Self::group_into_lines(filtered)
            .iter()
            .map(|line| {
                line.iter()
                    .map(|b| b.text.trim())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if server is healthy
    pub async fn health_check(&self) -> Result<(), ExtractionError> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ExtractionError::Server {
                status: response.status().as_u16(),
                body: "health check failed".to_string(),
            });
        }

        Ok(())
    }

    /// Decode, preprocess and PNG-encode the upload for the server
    fn prepare_image(
        preprocessing: &PreprocessingService,
        image: &UploadedImage,
    ) -> Result<String, ExtractionError> {
        let decoded = image::load_from_memory_with_format(&image.bytes, image.kind.image_format())?;
        let processed = preprocessing.preprocess(&decoded);
        Self::encode_image(&processed)
    }

    fn encode_image(image: &DynamicImage) -> Result<String, ExtractionError> {
        let mut buffer = Vec::new();
        image.write_to(&mut std::io::Cursor::new(&mut buffer), image::ImageFormat::Png)?;
        Ok(general_purpose::STANDARD.encode(&buffer))
    }
}

#[async_trait]
impl TextExtractor for HttpOcrClient {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn extract_text(&self, image: &UploadedImage) -> Result<String, ExtractionError> {
        let preprocessing = Arc::clone(&self.preprocessing);
        let upload = image.clone();

        // Decoding and resizing are CPU-bound
        let image_base64 = tokio::task::spawn_blocking(move || Self::prepare_image(&preprocessing, &upload))
            .await
            .map_err(|e| ExtractionError::Engine(format!("Image preparation task failed: {}", e)))??;

        let url = format!("{}/ocr", self.base_url);
        info!(file = %image.file_name, url = %url, "sending image to OCR server");

        let response = self
            .client
            .post(&url)
            .json(&ImageRequest { image_base64 })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ExtractionError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let data: OcrResponse = response.json().await?;
        debug!(boxes = data.boxes.len(), "OCR server responded");

        if data.boxes.is_empty() {
            return Ok(data.raw_text);
        }

        Ok(Self::process_ocr_boxes(data.boxes, self.min_score))
    }
}
