//! Scroll-driven content loading.
//!
//! Both panes virtualize their content; off-screen rows simply do not exist
//! in the DOM until the pane is scrolled. The loader reveals them by
//! simulated wheel input, sampling a convergence metric until it stops
//! moving. Every variant is bounded by a duration ceiling and an iteration
//! guard; the loop never runs unbounded.

use tracing::{debug, warn};
use waweb_page::{PageHandle, PageNode};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Which way to reveal content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Scroll down to load more entries; converges on `scrollHeight`.
    TowardContent,
    /// Scroll up toward the oldest content; converges on `scrollTop`.
    TowardOrigin,
}

impl ScrollDirection {
    fn metric(self) -> &'static str {
        match self {
            ScrollDirection::TowardContent => "el => el.scrollHeight",
            ScrollDirection::TowardOrigin => "el => el.scrollTop",
        }
    }

    fn delta_sign(self) -> f64 {
        match self {
            ScrollDirection::TowardContent => 1.0,
            ScrollDirection::TowardOrigin => -1.0,
        }
    }
}

/// Scroll the pane at `pane_selector` until its convergence metric stops
/// changing, or the configured ceiling is hit.
///
/// Returns `true` when the metric converged, `false` when the ceiling cut
/// the loop short or the pane could not be located. Scrolling is advisory:
/// a missing pane is a logged no-op, never an error.
pub async fn load_until_stable<P: PageHandle>(
    page: &P,
    config: &ClientConfig,
    pane_selector: &str,
    direction: ScrollDirection,
) -> Result<bool, ClientError> {
    let Some(pane) = page.query_selector(pane_selector).await? else {
        warn!("Could not locate pane '{}' for scrolling", pane_selector);
        return Ok(false);
    };

    let Some(bbox) = pane.bounding_box().await? else {
        warn!("Pane '{}' has no layout, skipping scroll", pane_selector);
        return Ok(false);
    };
    let (center_x, center_y) = bbox.center();

    let delta = config.scroll_delta * direction.delta_sign();
    let deadline = tokio::time::Instant::now() + config.scroll_max();

    let mut previous = sample(&pane, direction).await?;
    debug!(
        "Scrolling '{}' {:?} from metric {}",
        pane_selector, direction, previous
    );

    for round in 0..config.scroll_max_rounds {
        if tokio::time::Instant::now() >= deadline {
            warn!(
                "Scroll of '{}' hit the {}ms ceiling after {} rounds",
                pane_selector, config.scroll_max_ms, round
            );
            return Ok(false);
        }

        page.move_mouse(center_x, center_y).await?;
        page.wheel(0.0, delta).await?;
        tokio::time::sleep(config.settle_delay()).await;

        let current = sample(&pane, direction).await?;
        if current == previous {
            debug!(
                "Pane '{}' converged at metric {} after {} rounds",
                pane_selector,
                current,
                round + 1
            );
            return Ok(true);
        }
        previous = current;
    }

    warn!(
        "Scroll of '{}' hit the round guard ({})",
        pane_selector, config.scroll_max_rounds
    );
    Ok(false)
}

async fn sample<N: PageNode>(pane: &N, direction: ScrollDirection) -> Result<f64, ClientError> {
    let value = pane.evaluate(direction.metric()).await?;
    Ok(value.as_f64().unwrap_or(0.0))
}
