pub mod chat;
pub mod comparator;
pub mod customizer;
pub mod mood_board;
pub mod shared;
pub mod styles;
pub mod uploader;

pub use chat::ChatPanel;
pub use comparator::ImageComparator;
pub use customizer::MaterialCustomizer;
pub use mood_board::MoodBoardPanel;
pub use styles::StyleCarousel;
pub use uploader::ImageUploader;
