//! Sequential Chart Loader
//!
//! Fetches activity series and renders them into chart regions. Entities
//! are processed strictly one after another: the request for entity N+1 is
//! only dispatched once entity N's load has fully completed, whatever its
//! outcome. This keeps the archive server from being hit with one request
//! per list at page load.

use super::layout::{ChartLayout, ChartProps};
use super::series::{ChartSeries, EvolutionResponse, SeriesError};
use super::svg::RenderedChart;
use super::template::UrlTemplate;
use crate::index::first_seen;
use crate::render::{Node, Region};
use crate::transport::{Transport, TransportError};
use std::sync::Arc;
use thiserror::Error;

/// Why a chart could not be drawn
#[derive(Error, Debug, Clone)]
pub enum ChartError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Invalid series: {0}")]
    Series(#[from] SeriesError),
}

/// Result of one chart load
#[derive(Debug, Clone)]
pub enum ChartOutcome {
    /// Chart drawn from `points` data points
    Rendered { points: usize },
    /// Region already loading or already rendered, nothing dispatched
    Skipped,
    /// Fetch or parse failed; region content left untouched
    Failed(ChartError),
}

impl ChartOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, ChartOutcome::Rendered { .. })
    }
}

/// One row of the list index: an entity and the region showing its chart
#[derive(Debug, Clone)]
pub struct ChartRow {
    pub entity: String,
    pub region: Arc<Region>,
}

impl ChartRow {
    pub fn new(entity: impl Into<String>, region: Arc<Region>) -> Self {
        Self {
            entity: entity.into(),
            region,
        }
    }
}

/// Loads activity charts through a [`Transport`]
pub struct ChartLoader {
    transport: Arc<dyn Transport>,
    props: ChartProps,
}

impl ChartLoader {
    pub fn new(transport: Arc<dyn Transport>, props: ChartProps) -> Self {
        Self { transport, props }
    }

    pub fn props(&self) -> ChartProps {
        self.props
    }

    /// Load one chart into every region of a group.
    ///
    /// Skipped when any region is already loading or when none of them
    /// still shows a loading indicator. The indicator and the guards are
    /// cleared whatever the outcome.
    pub async fn load(&self, url: &str, regions: &[Arc<Region>]) -> ChartOutcome {
        if regions.is_empty()
            || regions.iter().any(|r| r.guard().is_set())
            || !regions.iter().any(|r| r.has_loading_indicator())
        {
            tracing::trace!(url = %url, "Chart already loaded or loading");
            return ChartOutcome::Skipped;
        }

        let mut tokens = Vec::with_capacity(regions.len());
        for region in regions {
            match region.guard().try_acquire() {
                Some(token) => tokens.push(token),
                None => return ChartOutcome::Skipped,
            }
        }

        let outcome = match self.fetch_series(url).await {
            Ok(series) => {
                let layout = ChartLayout::compute(&series, self.props);
                for region in regions {
                    draw(region, layout.as_ref());
                }
                tracing::debug!(url = %url, points = series.len(), "Chart rendered");
                ChartOutcome::Rendered {
                    points: series.len(),
                }
            }
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Chart load failed");
                ChartOutcome::Failed(e)
            }
        };

        for region in regions {
            region.remove_loading_indicator();
        }
        drop(tokens);

        outcome
    }

    /// Load charts for every row, one entity at a time.
    ///
    /// Rows sharing an entity are filled from a single request. Entities are
    /// visited in first-seen order; a failure never stops the sequence.
    pub async fn load_sequence(
        &self,
        template: &UrlTemplate,
        rows: &[ChartRow],
    ) -> Vec<(String, ChartOutcome)> {
        let entities = first_seen(rows.iter().map(|r| r.entity.as_str()));
        let mut results = Vec::with_capacity(entities.len());

        for entity in entities {
            let regions: Vec<Arc<Region>> = rows
                .iter()
                .filter(|r| r.entity == entity)
                .map(|r| Arc::clone(&r.region))
                .collect();

            let outcome = self.load(&template.expand(entity), &regions).await;
            results.push((entity.to_string(), outcome));
        }

        let rendered = results.iter().filter(|(_, o)| o.is_rendered()).count();
        tracing::info!(entities = results.len(), rendered, "Chart sequence complete");

        results
    }

    /// Redraw a single chart at a new width.
    ///
    /// Used when the container is resized. Unlike [`load`](Self::load) this
    /// is not guarded and runs even when the chart is already drawn.
    pub async fn redraw(&self, url: &str, region: &Region, width: f64) -> ChartOutcome {
        let props = self.props.with_width(width);

        let outcome = match self.fetch_series(url).await {
            Ok(series) => {
                let layout = ChartLayout::compute(&series, props);
                draw(region, layout.as_ref());
                ChartOutcome::Rendered {
                    points: series.len(),
                }
            }
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Chart redraw failed");
                ChartOutcome::Failed(e)
            }
        };

        region.remove_loading_indicator();
        outcome
    }

    async fn fetch_series(&self, url: &str) -> Result<ChartSeries, ChartError> {
        let response = self.transport.get(url).await?.error_for_status()?;
        let body: EvolutionResponse = response.decode()?;
        Ok(ChartSeries::from_raw(&body.evolution)?)
    }
}

/// Replace any chart in `region` with a fresh one
fn draw(region: &Region, layout: Option<&ChartLayout>) {
    region.remove_charts();
    if let Some(layout) = layout {
        region.append(Node::Chart(RenderedChart::new(layout.clone())));
    }
}

/// Chart for the list overview page, redrawn whenever its container resizes
pub struct OverviewChart {
    loader: ChartLoader,
    url: String,
    region: Arc<Region>,
}

impl OverviewChart {
    pub fn new(loader: ChartLoader, url: impl Into<String>, region: Arc<Region>) -> Self {
        Self {
            loader,
            url: url.into(),
            region,
        }
    }

    pub fn region(&self) -> &Arc<Region> {
        &self.region
    }

    /// Draw at the container's current width
    pub async fn on_resize(&self, width: f64) -> ChartOutcome {
        self.loader.redraw(&self.url, &self.region, width).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{MockTransport, Response};
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;

    const TEMPLATE: &str = "/list/PLACEHOLDER@PLACEHOLDER/recent-activity";

    fn activity() -> serde_json::Value {
        json!({
            "evolution": [
                {"date": "2024-03-01", "count": 0},
                {"date": "2024-03-02", "count": 5},
                {"date": "2024-03-03", "count": 3}
            ]
        })
    }

    fn url(entity: &str) -> String {
        UrlTemplate::new(TEMPLATE).unwrap().expand(entity)
    }

    fn loader(mock: MockTransport) -> (ChartLoader, Arc<MockTransport>) {
        let mock = Arc::new(mock);
        let loader = ChartLoader::new(mock.clone(), ChartProps::default());
        (loader, mock)
    }

    #[tokio::test]
    async fn test_sequence_dispatch_waits_for_previous_completion() {
        let entities = ["a@x.org", "b@x.org", "c@x.org"];
        let regions: Vec<Arc<Region>> = entities.iter().map(|e| Region::shared(*e)).collect();

        // At each dispatch, record whether every earlier region had finished
        let observed: Arc<Mutex<Vec<(String, bool)>>> = Arc::new(Mutex::new(Vec::new()));
        let hook_regions = regions.clone();
        let hook_log = observed.clone();

        let mut mock = MockTransport::new()
            .with_latency(Duration::from_millis(10))
            .on_dispatch(move |dispatched| {
                let idx = hook_regions
                    .iter()
                    .position(|r| url(r.id()) == dispatched)
                    .unwrap();
                let prior_done = hook_regions[..idx]
                    .iter()
                    .all(|r| !r.guard().is_set() && !r.has_loading_indicator());
                hook_log.lock().unwrap().push((dispatched.to_string(), prior_done));
            });
        for entity in entities {
            mock = mock.respond_json(url(entity), activity());
        }
        let (loader, mock) = loader(mock);

        let rows: Vec<ChartRow> = entities
            .iter()
            .zip(&regions)
            .map(|(e, r)| ChartRow::new(*e, r.clone()))
            .collect();
        let results = loader
            .load_sequence(&UrlTemplate::new(TEMPLATE).unwrap(), &rows)
            .await;

        let expected: Vec<String> = entities.iter().map(|e| url(e)).collect();
        assert_eq!(mock.urls(), expected);

        let observed = observed.lock().unwrap();
        assert_eq!(observed.len(), 3);
        assert!(observed.iter().all(|(_, done)| *done));

        assert!(results.iter().all(|(_, o)| o.is_rendered()));
        for region in &regions {
            assert_eq!(region.charts().len(), 1);
            assert!(!region.has_loading_indicator());
        }
    }

    #[tokio::test]
    async fn test_guarded_region_is_not_refetched() {
        let (loader, mock) = loader(MockTransport::new().respond_json("/activity", activity()));
        let region = Region::shared("devel");

        let token = region.guard().try_acquire().unwrap();
        let outcome = loader.load("/activity", &[region.clone()]).await;
        assert!(matches!(outcome, ChartOutcome::Skipped));
        assert!(mock.urls().is_empty());

        drop(token);
        let outcome = loader.load("/activity", &[region.clone()]).await;
        assert!(outcome.is_rendered());
        assert_eq!(mock.urls().len(), 1);
        assert!(!region.state().loading);
    }

    #[tokio::test]
    async fn test_rendered_region_is_skipped() {
        let (loader, mock) = loader(MockTransport::new().respond_json("/activity", activity()));
        let region = Arc::new(Region::empty("devel"));

        let outcome = loader.load("/activity", &[region]).await;
        assert!(matches!(outcome, ChartOutcome::Skipped));
        assert!(mock.urls().is_empty());
    }

    #[tokio::test]
    async fn test_failure_is_silent_and_sequence_continues() {
        let mock = MockTransport::new()
            .respond_json(url("a@x.org"), activity())
            .respond(url("b@x.org"), Ok(Response::new(500, "boom")))
            .respond_json(url("c@x.org"), activity());
        let (loader, mock) = loader(mock);

        let rows = vec![
            ChartRow::new("a@x.org", Region::shared("a")),
            ChartRow::new("b@x.org", Region::shared("b")),
            ChartRow::new("c@x.org", Region::shared("c")),
        ];
        let results = loader
            .load_sequence(&UrlTemplate::new(TEMPLATE).unwrap(), &rows)
            .await;

        assert_eq!(mock.urls().len(), 3);
        assert!(results[0].1.is_rendered());
        assert!(matches!(results[1].1, ChartOutcome::Failed(_)));
        assert!(results[2].1.is_rendered());

        // Failed region keeps no chart but loses its indicator and guard
        assert!(rows[1].region.charts().is_empty());
        assert!(!rows[1].region.has_loading_indicator());
        assert!(!rows[1].region.state().loading);
    }

    #[tokio::test]
    async fn test_duplicate_entities_share_one_fetch() {
        let (loader, mock) =
            loader(MockTransport::new().respond_json(url("a@x.org"), activity()));

        let rows = vec![
            ChartRow::new("a@x.org", Region::shared("row-1")),
            ChartRow::new("a@x.org", Region::shared("row-2")),
        ];
        let results = loader
            .load_sequence(&UrlTemplate::new(TEMPLATE).unwrap(), &rows)
            .await;

        assert_eq!(results.len(), 1);
        assert_eq!(mock.urls().len(), 1);
        assert_eq!(rows[0].region.charts().len(), 1);
        assert_eq!(rows[1].region.charts().len(), 1);
    }

    #[tokio::test]
    async fn test_redraw_replaces_previous_chart() {
        let (loader, mock) = loader(MockTransport::new().respond_json("/overview", activity()));
        let overview = OverviewChart::new(loader, "/overview", Region::shared("stats"));

        assert!(overview.on_resize(400.0).await.is_rendered());
        assert!(overview.on_resize(800.0).await.is_rendered());

        let charts = overview.region().charts();
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].layout.width, 800.0);
        assert_eq!(charts[0].layout.y_domain, (0, 5));
        assert_eq!(mock.urls().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_redraw_keeps_prior_chart() {
        let mock = MockTransport::new()
            .respond_json("/overview", activity())
            .respond("/overview", Err(TransportError::Network("reset".into())));
        let (loader, _mock) = loader(mock);
        let region = Region::shared("stats");

        assert!(loader.redraw("/overview", &region, 300.0).await.is_rendered());
        let outcome = loader.redraw("/overview", &region, 500.0).await;

        assert!(matches!(outcome, ChartOutcome::Failed(ChartError::Transport(_))));
        let charts = region.charts();
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].layout.width, 300.0);
    }

    #[tokio::test]
    async fn test_malformed_series_is_a_failure() {
        let body = json!({"evolution": [{"date": "yesterday", "count": 1}]});
        let (loader, _mock) = loader(MockTransport::new().respond_json("/activity", body));
        let region = Region::shared("devel");

        let outcome = loader.load("/activity", &[region.clone()]).await;
        assert!(matches!(outcome, ChartOutcome::Failed(ChartError::Series(_))));
        assert!(!region.has_loading_indicator());
    }

    #[tokio::test]
    async fn test_detached_region_still_filled() {
        let (loader, _mock) = loader(
            MockTransport::new()
                .with_latency(Duration::from_millis(20))
                .respond_json("/activity", activity()),
        );
        let region = Region::shared("devel");

        let task = {
            let region = region.clone();
            tokio::spawn(async move { loader.load("/activity", &[region]).await })
        };
        tokio::time::sleep(Duration::from_millis(5)).await;
        region.detach();

        // No cancellation: the completion still writes into the removed region
        assert!(task.await.unwrap().is_rendered());
        assert!(!region.is_attached());
        assert_eq!(region.charts().len(), 1);
    }
}
