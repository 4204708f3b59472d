// Runner - attaches a reporter and a spec filter to a host and executes it

use tracing::info;

use crate::filter::{grep_option, ClientArgs, FilterError, SpecFilter};
use crate::host::Host;
use crate::report::{CoverageSource, ResultReporter, Transport};
use crate::sanitize::StackSanitizer;
use crate::state::RunSummary;
use crate::time::Clock;

/// Settings for one run
#[derive(Debug, Clone, Default)]
pub struct StartOptions {
    pub client_args: ClientArgs,
    pub sanitizer: StackSanitizer,
    pub coverage: CoverageSource,
}

/// Build the spec filter from the client's `--grep` option
pub fn create_spec_filter(client_args: &ClientArgs) -> Result<SpecFilter, FilterError> {
    let grep = grep_option(client_args);
    if !grep.is_empty() {
        info!("Filtering specs by: {}", grep);
    }
    SpecFilter::literal(&grep)
}

/// Install the filter, run the host against a reporter on `transport`, and
/// hand the transport back with the run totals
pub fn start<H, T>(
    host: &mut H,
    transport: T,
    options: StartOptions,
) -> Result<(T, RunSummary), FilterError>
where
    H: Host + ?Sized,
    T: Transport,
{
    let reporter = ResultReporter::new(transport);
    start_with_reporter(host, reporter, options)
}

/// Same as [`start`] with a caller-provided clock
pub fn start_with_clock<H, T, C>(
    host: &mut H,
    transport: T,
    clock: C,
    options: StartOptions,
) -> Result<(T, RunSummary), FilterError>
where
    H: Host + ?Sized,
    T: Transport,
    C: Clock,
{
    let reporter = ResultReporter::new(transport).with_clock(clock);
    start_with_reporter(host, reporter, options)
}

fn start_with_reporter<H, T, C>(
    host: &mut H,
    reporter: ResultReporter<T, C>,
    options: StartOptions,
) -> Result<(T, RunSummary), FilterError>
where
    H: Host + ?Sized,
    T: Transport,
    C: Clock,
{
    host.set_spec_filter(create_spec_filter(&options.client_args)?);

    let mut reporter = reporter
        .with_sanitizer(options.sanitizer)
        .with_coverage(options.coverage);
    host.execute(&mut reporter);

    let summary = reporter.summary().clone();
    Ok((reporter.into_transport(), summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_spec_filter_from_list() {
        let args = ClientArgs::from(&["--grep", "test"][..]);
        let filter = create_spec_filter(&args).expect("valid filter");
        assert!(filter.matches("test"));
        assert!(!filter.matches("bar"));
    }

    #[test]
    fn test_create_spec_filter_without_grep_matches_all() {
        let filter = create_spec_filter(&ClientArgs::default()).expect("valid filter");
        assert!(filter.matches("anything at all"));
        assert!(filter.matches(""));
    }
}
