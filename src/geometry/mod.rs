mod hit_testing;

pub use hit_testing::DropZones;
