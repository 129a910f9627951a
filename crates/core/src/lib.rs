//! Builds a face-annotated photo collection from stock photo search results.
//!
//! Photos are searched on Pexels, their primary face is located with ONNX
//! detectors, and the results are written as an iterable JSON document.

pub mod shared {
    pub mod constants;
    pub mod credentials;
    pub mod frame;
    #[cfg(test)]
    pub mod test_server;
}

pub mod search {
    pub mod domain {
        pub mod photo;
        pub mod photo_search;
    }
    pub mod infrastructure;
}

pub mod imaging {
    pub mod domain {
        pub mod image_fetcher;
        pub mod image_writer;
    }
    pub mod infrastructure;
}

pub mod detection {
    pub mod domain {
        pub mod face_box;
        pub mod face_detector;
        pub mod face_extractor;
        pub mod face_landmarks;
    }
    pub mod infrastructure;
}

pub mod iterable {
    pub mod domain {
        pub mod item;
        pub mod item_builder;
        pub mod iterable_writer;
        pub mod landmark_ranker;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod create_iterable_use_case;
    pub mod pipeline_logger;
    pub mod visualize_items_use_case;
}
