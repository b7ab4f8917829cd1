// CSV persistence for both pipeline stages.
//
// The video file doubles as resume state: its `coaster_title` column is the
// processed set. Reading it at start-up and appending afterwards assumes a
// single writer process; concurrent runs against one file are not supported.

pub mod coasters;
pub mod videos;

pub use coasters::{read_coaster_records, write_coaster_rows};
pub use videos::{append_video_rows, load_processed};
