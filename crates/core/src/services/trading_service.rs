use crate::errors::CoreError;
use crate::models::timeframe::Timeframe;
use crate::providers::widget::{ChartWidget, Resolution, WidgetConfig};
use crate::services::feeds::SpotQuoteFeed;
use crate::services::poller::Poller;

/// A mounted trading chart whose bar resolution follows the selected timeframe.
///
/// Mounts on [`TradingSession::open`], unmounts exactly once on
/// [`TradingSession::close`] or drop.
pub struct TradingSession<W: ChartWidget> {
    widget: W,
    handle: Option<W::Handle>,
    timeframe: Timeframe,
}

impl<W: ChartWidget> TradingSession<W> {
    /// Mount the widget into `container`. The resolution in `config` is
    /// replaced by the one `timeframe` maps to.
    pub fn open(
        mut widget: W,
        container: &str,
        mut config: WidgetConfig,
        timeframe: Timeframe,
    ) -> Result<Self, CoreError> {
        config.resolution = Resolution::for_timeframe(timeframe);
        let handle = widget.mount(container, &config)?;
        tracing::info!(container, symbol = %config.symbol, %timeframe, "Mounted trading chart");
        Ok(Self {
            widget,
            handle: Some(handle),
            timeframe,
        })
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn is_mounted(&self) -> bool {
        self.handle.is_some()
    }

    /// Switch timeframe. The widget is only touched when the value changes.
    pub fn set_timeframe(&mut self, timeframe: Timeframe) -> Result<(), CoreError> {
        if timeframe == self.timeframe {
            return Ok(());
        }
        if let Some(handle) = self.handle.as_mut() {
            self.widget
                .set_resolution(handle, Resolution::for_timeframe(timeframe))?;
        }
        self.timeframe = timeframe;
        Ok(())
    }

    pub fn close(mut self) -> Result<(), CoreError> {
        self.unmount()
    }

    fn unmount(&mut self) -> Result<(), CoreError> {
        match self.handle.take() {
            Some(handle) => {
                self.widget.unmount(handle)?;
                tracing::info!("Unmounted trading chart");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl<W: ChartWidget> Drop for TradingSession<W> {
    fn drop(&mut self) {
        if let Err(e) = self.unmount() {
            tracing::warn!(error = %e, "Failed to unmount trading chart");
        }
    }
}

/// The trading screen: spot quote header plus the embedded chart.
///
/// The quote does not depend on the timeframe; only the chart follows it.
pub struct TradingScreen<W: ChartWidget> {
    pub quote: Poller<SpotQuoteFeed>,
    pub chart: TradingSession<W>,
}

impl<W: ChartWidget> TradingScreen<W> {
    pub fn set_timeframe(&mut self, timeframe: Timeframe) -> Result<(), CoreError> {
        self.chart.set_timeframe(timeframe)
    }

    /// Stop polling and unmount the chart.
    pub fn close(self) -> Result<(), CoreError> {
        self.quote.stop();
        self.chart.close()
    }
}
