use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::detection::domain::face_extractor::FaceExtractor;
use crate::detection::domain::face_landmarks::LandmarkCategory;
use crate::imaging::domain::image_fetcher::ImageFetcher;
use crate::iterable::domain::item::{Item, Iterable};
use crate::iterable::domain::item_builder::build_item;
use crate::iterable::domain::iterable_writer::IterableWriter;
use crate::iterable::domain::landmark_ranker::rank_by_landmarks;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::search::domain::photo::SearchOptions;
use crate::search::domain::photo_search::PhotoSearch;

/// Parameters of one iterable-building run.
#[derive(Clone, Debug)]
pub struct CreateIterableRequest {
    pub search: SearchOptions,
    /// Landmark categories to rank by; empty keeps search order.
    pub sort_by: Vec<LandmarkCategory>,
    pub output_path: PathBuf,
}

/// Search → fetch → extract → filter → (rank) → write.
///
/// Photos are processed one at a time in search order. Any search, fetch or
/// decode failure aborts the run; photos without a face are dropped.
pub struct CreateIterableUseCase {
    search: Box<dyn PhotoSearch>,
    fetcher: Box<dyn ImageFetcher>,
    extractor: FaceExtractor,
    writer: Box<dyn IterableWriter>,
    logger: Box<dyn PipelineLogger>,
}

impl CreateIterableUseCase {
    pub fn new(
        search: Box<dyn PhotoSearch>,
        fetcher: Box<dyn ImageFetcher>,
        extractor: FaceExtractor,
        writer: Box<dyn IterableWriter>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            search,
            fetcher,
            extractor,
            writer,
            logger,
        }
    }

    /// Runs the pipeline and returns the document that was written.
    pub fn execute(
        &mut self,
        request: &CreateIterableRequest,
    ) -> Result<Iterable, Box<dyn std::error::Error>> {
        let items = self.collect_items(request)?;

        let items = if !request.sort_by.is_empty() && !items.is_empty() {
            let names: Vec<&str> = request.sort_by.iter().map(|c| c.as_str()).collect();
            self.logger
                .info(&format!("Sorting by landmarks: {}", names.join(", ")));
            rank_by_landmarks(items, &request.sort_by)?
        } else {
            items
        };

        let iterable = Iterable::new(items);
        self.write(&request.output_path, &iterable)?;
        self.logger.summary();
        Ok(iterable)
    }

    fn collect_items(
        &mut self,
        request: &CreateIterableRequest,
    ) -> Result<Vec<Item>, Box<dyn std::error::Error>> {
        let page = self.search.search(&request.search)?;
        let mut photos = page.photos;
        if let Some(limit) = request.search.per_page {
            photos.truncate(limit as usize);
        }
        let total = photos.len();
        log::info!("{total} photos returned for '{}'", request.search.query);

        self.logger.info("Detecting faces...");
        let mut items = Vec::with_capacity(total);
        for (i, photo) in photos.iter().enumerate() {
            let t0 = Instant::now();
            let frame = self.fetcher.fetch(&photo.src.large)?;
            let t1 = Instant::now();
            let face = self.extractor.extract(&frame)?;
            let t2 = Instant::now();

            self.logger
                .timing("fetch", t1.duration_since(t0).as_secs_f64() * 1000.0);
            self.logger
                .timing("detect", t2.duration_since(t1).as_secs_f64() * 1000.0);
            self.logger
                .metric("faces_found", if face.is_some() { 1.0 } else { 0.0 });

            let item = build_item(photo, face);
            if item.has_face() {
                items.push(item);
            } else {
                log::debug!("No face in photo {} ({}), skipping", photo.id, photo.src.large);
            }
            self.logger.progress(i + 1, total);
        }

        log::info!("{} of {total} photos kept", items.len());
        Ok(items)
    }

    fn write(&mut self, path: &Path, iterable: &Iterable) -> Result<(), Box<dyn std::error::Error>> {
        self.writer.write(path, iterable)?;
        self.logger
            .info(&format!("Created iterable at {}", path.display()));
        Ok(())
    }
}
