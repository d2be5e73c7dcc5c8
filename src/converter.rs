//! Tour page to GPX file pipeline

use std::path::Path;

use log::info;

use crate::config::{Configuration, Deadline};
use crate::error::{Error, Stage};
use crate::generator::gpx::GpxGenerator;
use crate::generator::tracker::Tracker;
use crate::sources::http::{Fetcher, HttpTransport, Transport};
use crate::sources::page::extract_payload;
use crate::sources::payload::SourceTour;

/// Downloads a tour page and writes it as a GPX file
pub struct Converter<T>
where
    T: Transport,
{
    config: Configuration,
    fetcher: Fetcher<T>,
}

impl Converter<HttpTransport> {
    /// Converter over HTTP, with the configured user agent
    pub fn new(config: Configuration) -> Result<Self, Error> {
        let transport = HttpTransport::new(&config.user_agent)?;

        Ok(Self::with_transport(config, transport))
    }
}

impl<T> Converter<T>
where
    T: Transport,
{
    pub fn with_transport(config: Configuration, transport: T) -> Self {
        let fetcher = Fetcher::new(transport, &config);

        Self { config, fetcher }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Run the whole conversion of `url` into `output`
    ///
    /// The output file is only created once the tour was fully mapped.
    pub fn convert(&self, url: &str, output: &Path, deadline: &Deadline) -> Result<(), Error> {
        info!("Downloading tour data from {}", url);
        let page = self.fetcher.fetch(url, deadline)?;

        let generator = self.build(url, &page, deadline)?;

        check(deadline, Stage::Write)?;
        generator.write(output)?;

        info!("Successfully created GPX file: {}", output.display());
        Ok(())
    }

    /// Map a downloaded page into the GPX document
    pub fn build(&self, url: &str, page: &str, deadline: &Deadline) -> Result<GpxGenerator, Error> {
        check(deadline, Stage::Extract)?;
        info!("Extracting JSON data from HTML");
        let json = extract_payload(page)?;

        check(deadline, Stage::Parse)?;
        let tour = SourceTour::parse(&json)?;

        check(deadline, Stage::Convert)?;
        let track = Tracker::new(tour.name.clone())
            .link(url.to_string())
            .build(&tour.positions())?;

        let mut generator = GpxGenerator::empty(self.config.user_agent.clone());
        generator.name = Some(tour.name.clone());
        generator.time = tour.start();
        generator.tracks = vec![track];

        Ok(generator)
    }
}

fn check(deadline: &Deadline, next: Stage) -> Result<(), Error> {
    if deadline.expired() {
        return Err(Error::DeadlineExceeded(next));
    }

    Ok(())
}
