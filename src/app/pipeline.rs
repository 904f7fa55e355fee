//! The fetch-and-apply sequence shared by every front-end.
//!
//! Order matters: outputs are initialized first, then the price is fetched, and
//! only a successful fetch touches pin levels. A failed fetch leaves whatever
//! the previous run lit.

use crate::data::PriceSource;
use crate::domain::{PriceReading, ThresholdConfig};
use crate::error::AppError;
use crate::gpio::OutputDriver;
use crate::indicator::IndicatorController;
use crate::report::RunSummary;

/// Initialize outputs, fetch the current price and light the matching group.
pub fn run_apply<S, D>(
    source: &S,
    controller: &mut IndicatorController<D>,
    thresholds: &ThresholdConfig,
) -> Result<RunSummary, AppError>
where
    S: PriceSource,
    D: OutputDriver,
{
    controller.initialize()?;

    let reading = fetch_price(source)?;
    let active = controller.apply(reading.per_kwh, thresholds)?;

    Ok(RunSummary {
        reading,
        thresholds: *thresholds,
        active,
    })
}

/// Fetch the current price, logging it.
pub fn fetch_price<S: PriceSource>(source: &S) -> Result<PriceReading, AppError> {
    let reading = source.fetch_current_price()?;
    tracing::info!(per_kwh = reading.per_kwh, "current price");
    Ok(reading)
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;
    use crate::data::{AmberClient, ApiConfig};
    use crate::domain::{Level, OutputGroup, PinMap, PinNumbering};
    use crate::error::{EXIT_FETCH, FetchError};
    use crate::gpio::SimulatedDriver;

    struct FixedPrice(f64);

    impl PriceSource for FixedPrice {
        fn fetch_current_price(&self) -> Result<PriceReading, FetchError> {
            Ok(PriceReading::new(self.0))
        }
    }

    struct NoPrice;

    impl PriceSource for NoPrice {
        fn fetch_current_price(&self) -> Result<PriceReading, FetchError> {
            Err(FetchError::Empty)
        }
    }

    fn controller() -> IndicatorController<SimulatedDriver> {
        IndicatorController::new(SimulatedDriver::new(), PinMap::default(), PinNumbering::Board)
    }

    fn thresholds() -> ThresholdConfig {
        ThresholdConfig::new(15.0, 25.0).unwrap()
    }

    #[test]
    fn run_apply_reports_active_group() {
        let mut controller = controller();
        let summary = run_apply(&FixedPrice(14.9), &mut controller, &thresholds()).unwrap();

        assert_eq!(summary.active, OutputGroup::Green);
        assert_eq!(summary.reading.per_kwh, 14.9);
        let driver = controller.into_driver();
        assert_eq!(driver.numbering(), Some(PinNumbering::Board));
        assert_eq!(driver.level(23), Some(Level::High));
        assert_eq!(driver.level(19), Some(Level::Low));
    }

    #[test]
    fn failed_fetch_leaves_pins_untouched() {
        let mut controller = controller();
        let err = run_apply(&NoPrice, &mut controller, &thresholds()).unwrap_err();

        assert_eq!(err.exit_code(), EXIT_FETCH);
        // Pins were configured but never written.
        assert!(controller.driver().writes().is_empty());
        assert_eq!(controller.driver().level(19), Some(Level::Low));
    }

    #[test]
    fn end_to_end_against_http_server() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/v1/sites/SITE/prices/current")
            .match_query(Matcher::UrlEncoded("resolution".into(), "5".into()))
            .match_header("accept", "application/json")
            .match_header("authorization", "Bearer psk_e2e")
            .with_status(200)
            .with_body(r#"[{"perKwh": 25.0, "descriptor": "neutral"}]"#)
            .create();

        let client = AmberClient::new(ApiConfig {
            base_url: server.url(),
            api_key: "psk_e2e".to_string(),
            site_id: "SITE".to_string(),
            resolution: "5".to_string(),
            timeout: None,
        })
        .unwrap();

        let mut controller = controller();
        let summary = run_apply(&client, &mut controller, &thresholds()).unwrap();

        mock.assert();
        assert_eq!(summary.active, OutputGroup::Amber);
        assert_eq!(summary.reading.descriptor.as_deref(), Some("neutral"));
        assert_eq!(controller.driver().level(21), Some(Level::High));
        assert_eq!(controller.driver().level(24), Some(Level::High));
    }
}
