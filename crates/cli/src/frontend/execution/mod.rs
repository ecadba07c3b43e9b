mod batch;
mod compare;
mod histogram;
mod slide;

use std::io::Write;

use logging::{VerbosityConfig, init_tracing};
use pagestore::PageStore;

use super::arguments::{CommandRequest, ParsedArgs};
use super::settings::build_classifier;
use crate::error::CliError;
use batch::run_batch;
use compare::{CompareRequest, run_compare};
use histogram::run_histogram;
use slide::{SlideRequest, run_slide};

/// Runs the parsed command and returns its exit code.
pub(crate) fn execute<Out: Write>(args: &ParsedArgs, stdout: &mut Out) -> Result<i32, CliError> {
    let verbosity = VerbosityConfig::from_verbose_level(args.verbose)
        .with_debug_topics(args.debug_topics.iter().copied());
    init_tracing(&verbosity)?;

    let store = PageStore::new(&args.dir);
    match &args.command {
        &CommandRequest::Compare {
            first,
            second,
            show_diff,
            json,
        } => {
            let classifier = build_classifier(args)?;
            let request = CompareRequest {
                first,
                second,
                show_diff,
                json,
                style: args.style,
            };
            run_compare(&store, &classifier, &request, stdout)
        }
        CommandRequest::Batch { log, keep_all } => {
            let classifier = build_classifier(args)?;
            run_batch(&store, &classifier, log, *keep_all, args.style, stdout)
        }
        CommandRequest::Slide {
            id,
            shift,
            fill,
            payload,
            output,
        } => {
            let request = SlideRequest {
                id: *id,
                shift: *shift,
                fill: *fill,
                payload: payload.as_deref(),
                output,
            };
            run_slide(&store, &request, stdout)
        }
        &CommandRequest::Histogram { id, top } => run_histogram(&store, id, top, stdout),
    }
}
