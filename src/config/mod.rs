use error_stack::Report;
use thiserror::Error;

mod database;
mod server;

pub use database::Database;
pub use server::Server;

#[derive(Debug, Error)]
#[error("Failed to load configuration")]
pub struct ParseError;

// figment buries the failing key and its source inside the error
// value; pull them out as printable attachments so a bad config
// names the culprit.
pub(crate) fn attach_figment_error(e: figment::Error) -> Report<ParseError> {
    let mut report = Report::new(ParseError).attach_printable(format!("{}", e.kind));

    if let (Some(profile), Some(md)) = (&e.profile, &e.metadata) {
        if !e.path.is_empty() {
            let key = md.interpolate(profile, &e.path);
            report = report.attach_printable(format!("for key {key:?}"));
        }
    }

    if let Some(md) = &e.metadata {
        report = match &md.source {
            Some(source) => report.attach_printable(format!("in {} {}", source, md.name)),
            None => report.attach_printable(format!("in {}", md.name)),
        };
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn names_the_failing_value() {
        Jail::expect_with(|jail| {
            jail.set_env("ROSTER_PORT", "not-a-port");

            let error = Server::figment().extract::<Server>().unwrap_err();
            let rendered = format!("{:?}", attach_figment_error(error));
            assert!(rendered.contains("not-a-port"));

            Ok(())
        });
    }
}
