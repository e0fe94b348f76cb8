pub mod orchestration;

pub use orchestration::{
    run_chlog, run_current, run_release, ChlogArgs, ChlogOutcome, CurrentArgs, HistorySource,
    ReleaseArgs,
};
