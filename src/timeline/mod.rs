pub mod geometry;
pub mod layout;

pub use geometry::{
    block_span, hour_labels, time_of_minute, zoom_step, TimelineScale, DEFAULT_ZOOM, MAX_ZOOM,
    MINUTES_PER_DAY, MIN_ZOOM,
};
pub use layout::{layout_tasks, max_columns, TaskLayout};
