use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use rust_decimal::{Decimal, RoundingStrategy};
use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::{format_count, format_percent, AppError, Money, Result};
use crate::modules::reports::models::{
    CountMetrics, GeographicDistribution, InsufficientData, MerchantReport, MetricKind,
    MetricOutcome, RevenueMetrics, StatusMetrics, UserMetrics,
};

/// Heading shared by every report page
#[derive(Debug, Clone)]
pub struct PageHeader {
    pub title: String,
    pub merchant_id: String,
    pub window_days: i64,
}

/// Draws one image per metric group.
///
/// Implementations are synchronous; the report service runs them on the
/// blocking thread pool.
pub trait ChartRenderer: Send + Sync {
    fn render_revenue(
        &self,
        header: &PageHeader,
        metrics: &MetricOutcome<RevenueMetrics>,
        output: &Path,
    ) -> Result<()>;

    fn render_counts(
        &self,
        header: &PageHeader,
        metrics: &MetricOutcome<CountMetrics>,
        output: &Path,
    ) -> Result<()>;

    fn render_status(
        &self,
        header: &PageHeader,
        metrics: &MetricOutcome<StatusMetrics>,
        output: &Path,
    ) -> Result<()>;

    fn render_users(
        &self,
        header: &PageHeader,
        metrics: &MetricOutcome<UserMetrics>,
        output: &Path,
    ) -> Result<()>;

    fn render_geography(
        &self,
        header: &PageHeader,
        metrics: &MetricOutcome<GeographicDistribution>,
        output: &Path,
    ) -> Result<()>;
}

/// Render every page of `report` into `dir`, returning the image paths in page order
///
/// `cancel` is checked before each page; once set, rendering stops with a
/// `Timeout` error and no further files are written.
pub fn render_report(
    renderer: &dyn ChartRenderer,
    report: &MerchantReport,
    dir: &Path,
    cancel: &AtomicBool,
) -> Result<Vec<PathBuf>> {
    let mut images = Vec::with_capacity(MetricKind::ALL.len());

    for kind in MetricKind::ALL {
        if cancel.load(Ordering::Acquire) {
            return Err(AppError::Timeout(format!(
                "rendering cancelled before the {} page",
                kind
            )));
        }

        let header = PageHeader {
            title: kind.title(report.window.days()),
            merchant_id: report.merchant_id.clone(),
            window_days: report.window.days(),
        };
        let output = dir.join(kind.artifact_file_name());

        match kind {
            MetricKind::Revenue => renderer.render_revenue(&header, &report.revenue, &output)?,
            MetricKind::Count => renderer.render_counts(&header, &report.counts, &output)?,
            MetricKind::Status => renderer.render_status(&header, &report.status, &output)?,
            MetricKind::Users => renderer.render_users(&header, &report.users, &output)?,
            MetricKind::Geography => {
                renderer.render_geography(&header, &report.geography, &output)?
            }
        }

        tracing::debug!(metric = %kind, path = %output.display(), "Chart rendered");
        images.push(output);
    }

    Ok(images)
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const FONT: &str = "sans-serif";
const BANNER_HEIGHT: i32 = 110;
const BANNER_COLOR: RGBColor = RGBColor(0xb7, 0xcb, 0xbf);
const HEADER_CELL_COLOR: RGBColor = RGBColor(0x2a, 0x7f, 0xcc);
const BODY_CELL_COLOR: RGBColor = RGBColor(0xf0, 0xf0, 0xf0);
const TOTAL_CELL_COLOR: RGBColor = RGBColor(0xe6, 0xf2, 0xff);
const REVENUE_BAR_COLOR: RGBColor = RGBColor(65, 105, 225);
const COUNT_BAR_COLOR: RGBColor = RGBColor(34, 139, 34);
const USER_BAR_COLOR: RGBColor = RGBColor(0x9c, 0x27, 0xb0);
const TREND_COLOR: RGBColor = RGBColor(0xff, 0x57, 0x22);
const PASTEL: [RGBColor; 10] = [
    RGBColor(161, 201, 244),
    RGBColor(255, 180, 130),
    RGBColor(141, 229, 161),
    RGBColor(255, 159, 155),
    RGBColor(208, 187, 255),
    RGBColor(222, 187, 155),
    RGBColor(250, 176, 228),
    RGBColor(207, 207, 207),
    RGBColor(255, 254, 163),
    RGBColor(185, 242, 240),
];

/// Chart renderer backed by `plotters` bitmap output
#[derive(Debug, Clone)]
pub struct PlottersChartRenderer {
    width: u32,
    height: u32,
}

impl PlottersChartRenderer {
    /// Portrait A4 at 150 DPI
    pub const DEFAULT_SIZE: (u32, u32) = (1240, 1754);

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Renderer producing 210 x 297 mm pages at `dpi`
    pub fn a4(dpi: f64) -> Self {
        let to_px = |mm: f64| ((mm / 25.4 * dpi).round() as u32).max(1);
        Self::new(to_px(210.0), to_px(297.0))
    }

    /// Frame, banner and title, then `body` in the remaining area
    fn draw_page<F>(&self, header: &PageHeader, output: &Path, body: F) -> Result<()>
    where
        F: FnOnce(&Area<'_>) -> anyhow::Result<()>,
    {
        let drawing: anyhow::Result<()> = (|| {
            let root = BitMapBackend::new(output, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE)?;

            let frame = root.margin(12, 12, 12, 12);
            let (frame_w, frame_h) = frame.dim_in_pixel();
            frame.draw(&Rectangle::new(
                [(0, 0), (frame_w as i32 - 1, frame_h as i32 - 1)],
                BLACK.stroke_width(3),
            ))?;

            let (banner, content) = frame.split_vertically(BANNER_HEIGHT);
            let (banner_w, _) = banner.dim_in_pixel();
            banner.fill(&BANNER_COLOR)?;
            banner.draw_text(
                &header.title,
                &(FONT, 40)
                    .into_font()
                    .style(FontStyle::Bold)
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Center, VPos::Center)),
                (banner_w as i32 / 2, BANNER_HEIGHT / 2 - 12),
            )?;
            banner.draw_text(
                &format!("Merchant {}", header.merchant_id),
                &(FONT, 22)
                    .into_font()
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Center, VPos::Center)),
                (banner_w as i32 / 2, BANNER_HEIGHT / 2 + 28),
            )?;

            body(&content.margin(20, 20, 20, 20))?;

            root.present()?;
            Ok(())
        })();

        drawing.map_err(|e| {
            AppError::render(format!("failed to draw {}: {:#}", output.display(), e))
        })
    }

    fn draw_insufficient(&self, header: &PageHeader, missing: &InsufficientData, output: &Path) -> Result<()> {
        tracing::info!(metric = %missing.metric, reason = %missing.reason, "Rendering insufficient data page");

        self.draw_page(header, output, |area| {
            let (w, h) = area.dim_in_pixel();
            area.draw_text(
                "Insufficient data",
                &(FONT, 48)
                    .into_font()
                    .style(FontStyle::Bold)
                    .color(&RGBColor(90, 90, 90))
                    .pos(Pos::new(HPos::Center, VPos::Center)),
                (w as i32 / 2, h as i32 / 2 - 40),
            )?;
            area.draw_text(
                &missing.reason,
                &(FONT, 24)
                    .into_font()
                    .color(&RGBColor(90, 90, 90))
                    .pos(Pos::new(HPos::Center, VPos::Center)),
                (w as i32 / 2, h as i32 / 2 + 20),
            )?;
            Ok(())
        })
    }
}

impl Default for PlottersChartRenderer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE.0, Self::DEFAULT_SIZE.1)
    }
}

impl ChartRenderer for PlottersChartRenderer {
    fn render_revenue(
        &self,
        header: &PageHeader,
        metrics: &MetricOutcome<RevenueMetrics>,
        output: &Path,
    ) -> Result<()> {
        let revenue = match metrics {
            MetricOutcome::Computed(revenue) => revenue,
            MetricOutcome::InsufficientData(missing) => {
                return self.draw_insufficient(header, missing, output)
            }
        };

        let labels: Vec<String> = revenue.daily.iter().map(|d| d.date.to_string()).collect();
        let values: Vec<f64> = revenue
            .daily
            .iter()
            .map(|d| Money::to_plot_value(d.value))
            .collect();
        let trend: Vec<Option<f64>> = revenue
            .moving_average
            .iter()
            .map(|v| v.map(Money::to_plot_value))
            .collect();

        self.draw_page(header, output, |area| {
            let (table, chart) = split_at_fraction(area, 0.25);
            draw_kpi_table(&table, "Amounts Analysis", &revenue_kpis(revenue))?;
            draw_bar_chart(
                &chart,
                &BarSeries {
                    caption: "Daily Paid Amounts",
                    y_desc: "Total Paid Amount ($)",
                    labels: &labels,
                    values: &values,
                    color: REVENUE_BAR_COLOR,
                    value_label: &|v| {
                        if v > 0.0 {
                            Money::format_whole(plot_value_to_decimal(v))
                        } else {
                            String::new()
                        }
                    },
                    trend: (!trend.is_empty()).then_some(("7-day Moving Avg", trend.as_slice())),
                },
            )
        })
    }

    fn render_counts(
        &self,
        header: &PageHeader,
        metrics: &MetricOutcome<CountMetrics>,
        output: &Path,
    ) -> Result<()> {
        let counts = match metrics {
            MetricOutcome::Computed(counts) => counts,
            MetricOutcome::InsufficientData(missing) => {
                return self.draw_insufficient(header, missing, output)
            }
        };

        let labels: Vec<String> = counts.daily.iter().map(|d| d.date.to_string()).collect();
        let values: Vec<f64> = counts.daily.iter().map(|d| d.value as f64).collect();

        self.draw_page(header, output, |area| {
            let (table, chart) = split_at_fraction(area, 0.25);
            draw_kpi_table(&table, "Count Analysis", &count_kpis(counts))?;
            draw_bar_chart(
                &chart,
                &BarSeries {
                    caption: "Daily Transaction Counts",
                    y_desc: "Number of Transactions",
                    labels: &labels,
                    values: &values,
                    color: COUNT_BAR_COLOR,
                    value_label: &|v| format!("{}", v.round() as i64),
                    trend: None,
                },
            )
        })
    }

    fn render_status(
        &self,
        header: &PageHeader,
        metrics: &MetricOutcome<StatusMetrics>,
        output: &Path,
    ) -> Result<()> {
        let status = match metrics {
            MetricOutcome::Computed(status) => status,
            MetricOutcome::InsufficientData(missing) => {
                return self.draw_insufficient(header, missing, output)
            }
        };

        let slices: Vec<(String, f64)> = status
            .statuses
            .iter()
            .map(|s| (s.status.clone(), s.count as f64))
            .collect();
        let breakdown = status.financial_breakdown();
        let bar_labels: Vec<String> = breakdown.iter().map(|(label, _)| label.to_string()).collect();
        let bar_values: Vec<f64> = breakdown
            .iter()
            .map(|(_, amount)| Money::to_plot_value(*amount))
            .collect();

        self.draw_page(header, output, |area| {
            let (top, bottom) = split_at_fraction(area, 0.5);
            let (top_w, _) = top.dim_in_pixel();
            let (pie, table) = top.split_horizontally((top_w as f64 * 0.6) as i32);

            draw_pie(&pie, "Transaction Status Distribution", &slices)?;
            draw_table(&table, ("Status", "Count"), &status_rows(status), true)?;
            draw_bar_chart(
                &bottom,
                &BarSeries {
                    caption: "Financial Breakdown",
                    y_desc: "Amount ($)",
                    labels: &bar_labels,
                    values: &bar_values,
                    color: REVENUE_BAR_COLOR,
                    value_label: &|v| {
                        Money::format(plot_value_to_decimal(v))
                    },
                    trend: None,
                },
            )
        })
    }

    fn render_users(
        &self,
        header: &PageHeader,
        metrics: &MetricOutcome<UserMetrics>,
        output: &Path,
    ) -> Result<()> {
        let users = match metrics {
            MetricOutcome::Computed(users) => users,
            MetricOutcome::InsufficientData(missing) => {
                return self.draw_insufficient(header, missing, output)
            }
        };

        let labels: Vec<String> = users
            .daily_active_users
            .iter()
            .map(|d| d.date.to_string())
            .collect();
        let values: Vec<f64> = users
            .daily_active_users
            .iter()
            .map(|d| d.value as f64)
            .collect();
        let trend: Vec<Option<f64>> = users
            .moving_average
            .iter()
            .map(|v| v.map(Money::to_plot_value))
            .collect();

        self.draw_page(header, output, |area| {
            let (table, chart) = split_at_fraction(area, 0.3);
            draw_kpi_table(&table, "User Analysis", &user_kpis(users, header.window_days))?;
            if values.is_empty() {
                let (w, h) = chart.dim_in_pixel();
                chart.draw_text(
                    "No active users in the window",
                    &(FONT, 28)
                        .into_font()
                        .color(&RGBColor(90, 90, 90))
                        .pos(Pos::new(HPos::Center, VPos::Center)),
                    (w as i32 / 2, h as i32 / 2),
                )?;
                return Ok(());
            }
            draw_bar_chart(
                &chart,
                &BarSeries {
                    caption: "Daily Frequency of Users",
                    y_desc: "Number of Users",
                    labels: &labels,
                    values: &values,
                    color: USER_BAR_COLOR,
                    value_label: &|v| {
                        if v > 0.0 {
                            format!("{}", v.round() as i64)
                        } else {
                            String::new()
                        }
                    },
                    trend: Some(("7-Day Average", trend.as_slice())),
                },
            )
        })
    }

    fn render_geography(
        &self,
        header: &PageHeader,
        metrics: &MetricOutcome<GeographicDistribution>,
        output: &Path,
    ) -> Result<()> {
        let geography = match metrics {
            MetricOutcome::Computed(geography) => geography,
            MetricOutcome::InsufficientData(missing) => {
                return self.draw_insufficient(header, missing, output)
            }
        };

        let slices: Vec<(String, f64)> = geography
            .top_states
            .iter()
            .map(|s| (s.state.clone(), s.users as f64))
            .collect();

        self.draw_page(header, output, |area| {
            draw_pie(area, "Top 10 States by User Count", &slices)
        })
    }
}

/// KPI rows of the revenue page
pub(crate) fn revenue_kpis(revenue: &RevenueMetrics) -> Vec<(String, String)> {
    vec![
        ("Total Paid Amount".to_string(), Money::format(revenue.total_paid)),
        ("Average Daily".to_string(), Money::format(revenue.average_daily_paid)),
        (
            "Highest Day".to_string(),
            format!(
                "{} ({})",
                revenue.peak_day.date.format("%Y-%m-%d"),
                Money::format(revenue.peak_day.value)
            ),
        ),
    ]
}

/// KPI rows of the transaction count page
pub(crate) fn count_kpis(counts: &CountMetrics) -> Vec<(String, String)> {
    vec![
        ("Total Transactions".to_string(), format_count(counts.total_transactions)),
        (
            "Average Daily".to_string(),
            format!(
                "{:.1}",
                counts
                    .average_daily
                    .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
            ),
        ),
        (
            "Busiest Day".to_string(),
            format!(
                "{} ({} transactions)",
                counts.busiest_day.date, counts.busiest_day.value
            ),
        ),
        (
            "Slowest Day".to_string(),
            format!(
                "{} ({} transactions)",
                counts.slowest_day.date, counts.slowest_day.value
            ),
        ),
    ]
}

/// KPI rows of the user metrics page
pub(crate) fn user_kpis(users: &UserMetrics, window_days: i64) -> Vec<(String, String)> {
    vec![
        ("Total Unique Users".to_string(), format_count(users.total_users)),
        ("Market Share".to_string(), format_percent(users.market_share)),
        (
            format!("New Users Last {} Days", window_days),
            format_count(users.new_users),
        ),
    ]
}

/// Status table rows, with a trailing total row
pub(crate) fn status_rows(status: &StatusMetrics) -> Vec<(String, String)> {
    status
        .statuses
        .iter()
        .map(|s| (s.status.clone(), format_count(s.count)))
        .chain(std::iter::once((
            "Total".to_string(),
            format_count(status.total_transactions),
        )))
        .collect()
}

/// Percentages of each slice, as drawn on the pie
pub(crate) fn slice_percentages(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| v / total * 100.0).collect()
}

fn plot_value_to_decimal(value: f64) -> Decimal {
    Decimal::from_f64_retain(value).unwrap_or_default()
}

fn split_at_fraction<'a>(area: &Area<'a>, fraction: f64) -> (Area<'a>, Area<'a>) {
    let (_, h) = area.dim_in_pixel();
    area.split_vertically((h as f64 * fraction) as i32)
}

fn draw_kpi_table(area: &Area<'_>, heading: &str, rows: &[(String, String)]) -> anyhow::Result<()> {
    let (w, _) = area.dim_in_pixel();
    area.draw_text(
        heading,
        &(FONT, 26)
            .into_font()
            .style(FontStyle::Bold)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top)),
        (w as i32 / 2, 0),
    )?;
    let (_, table) = area.split_vertically(40);
    draw_table(&table, ("Metric", "Value"), rows, false)
}

/// Two-column table with a coloured header; `total_row` highlights the last row
fn draw_table(
    area: &Area<'_>,
    columns: (&str, &str),
    rows: &[(String, String)],
    total_row: bool,
) -> anyhow::Result<()> {
    let (w, h) = area.dim_in_pixel();
    let row_height = ((h as i32) / (rows.len() as i32 + 1)).clamp(24, 56);
    let left = (w as i32) / 10;
    let right = (w as i32) * 9 / 10;
    let split = left + (right - left) * 2 / 5;
    let cell_font = (FONT, (row_height * 2 / 5).max(14));

    let header_style = cell_font.into_font().style(FontStyle::Bold).color(&WHITE);
    let body_style = cell_font.into_font().color(&BLACK);
    let total_style = cell_font.into_font().style(FontStyle::Bold).color(&BLACK);

    let all_rows = std::iter::once((columns.0.to_string(), columns.1.to_string()))
        .chain(rows.iter().cloned())
        .enumerate();

    for (i, (metric, value)) in all_rows {
        let top = i as i32 * row_height;
        let is_header = i == 0;
        let is_total = total_row && i == rows.len();
        let fill = if is_header {
            HEADER_CELL_COLOR
        } else if is_total {
            TOTAL_CELL_COLOR
        } else {
            BODY_CELL_COLOR
        };
        let style = if is_header {
            &header_style
        } else if is_total {
            &total_style
        } else {
            &body_style
        };

        for (x0, x1, text) in [(left, split, &metric), (split, right, &value)] {
            area.draw(&Rectangle::new([(x0, top), (x1, top + row_height)], fill.filled()))?;
            area.draw(&Rectangle::new(
                [(x0, top), (x1, top + row_height)],
                BLACK.stroke_width(1),
            ))?;
            area.draw_text(text, style, (x0 + 10, top + row_height / 4))?;
        }
    }

    Ok(())
}

struct BarSeries<'a> {
    caption: &'a str,
    y_desc: &'a str,
    labels: &'a [String],
    values: &'a [f64],
    color: RGBColor,
    value_label: &'a dyn Fn(f64) -> String,
    trend: Option<(&'a str, &'a [Option<f64>])>,
}

fn draw_bar_chart(area: &Area<'_>, bars: &BarSeries<'_>) -> anyhow::Result<()> {
    let n = bars.values.len();
    if n == 0 {
        return Ok(());
    }

    let max = bars.values.iter().copied().fold(0.0_f64, f64::max);
    let min = bars.values.iter().copied().fold(0.0_f64, f64::min);
    let y_top = if max > 0.0 { max * 1.15 } else { 1.0 };
    let y_bottom = if min < 0.0 { min * 1.15 } else { 0.0 };
    let labels = bars.labels;

    let mut chart = ChartBuilder::on(area)
        .caption(bars.caption, (FONT, 30))
        .margin(20)
        .x_label_area_size(130)
        .y_label_area_size(110)
        .build_cartesian_2d((0..n).into_segmented(), y_bottom..y_top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc(bars.y_desc)
        .x_labels(n)
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .x_label_style((FONT, 16).into_font().transform(FontTransform::Rotate90))
        .y_label_style((FONT, 18))
        .draw()?;

    chart.draw_series(bars.values.iter().enumerate().map(|(i, v)| {
        let mut bar = Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), *v)],
            bars.color.mix(0.8).filled(),
        );
        bar.set_margin(0, 0, 4, 4);
        bar
    }))?;

    let label_style = TextStyle::from((FONT, 16).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(bars.values.iter().enumerate().map(|(i, v)| {
        Text::new(
            (bars.value_label)(*v),
            (SegmentValue::CenterOf(i), *v),
            label_style.clone(),
        )
    }))?;

    if let Some((name, trend)) = bars.trend {
        let points: Vec<(SegmentValue<usize>, f64)> = trend
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (SegmentValue::CenterOf(i), v)))
            .collect();

        if !points.is_empty() {
            chart
                .draw_series(LineSeries::new(points, TREND_COLOR.stroke_width(3)))?
                .label(name)
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], TREND_COLOR.stroke_width(3)));

            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font((FONT, 18))
                .draw()?;
        }
    }

    Ok(())
}

fn draw_pie(area: &Area<'_>, caption: &str, slices: &[(String, f64)]) -> anyhow::Result<()> {
    let (w, h) = area.dim_in_pixel();
    area.draw_text(
        caption,
        &(FONT, 28)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top)),
        (w as i32 / 2, 10),
    )?;

    let values: Vec<f64> = slices.iter().map(|(_, v)| *v).collect();
    let percentages = slice_percentages(&values);
    let center = (w as f64 / 2.0, h as f64 / 2.0 + 20.0);
    let radius = (w.min(h) as f64) * 0.32;
    let label_style = (FONT, 20)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let percent_style = (FONT, 18)
        .into_font()
        .style(FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));

    // Wedges run counter-clockwise starting at twelve o'clock
    let mut start = PI / 2.0;
    for (i, ((label, _), percent)) in slices.iter().zip(&percentages).enumerate() {
        let sweep = percent / 100.0 * 2.0 * PI;
        if sweep <= 0.0 {
            continue;
        }

        let steps = ((sweep / 0.02).ceil() as usize).max(2);
        let point_at = |angle: f64, r: f64| {
            (
                (center.0 + r * angle.cos()).round() as i32,
                (center.1 - r * angle.sin()).round() as i32,
            )
        };

        let mut wedge = Vec::with_capacity(steps + 2);
        wedge.push(point_at(0.0, 0.0));
        for step in 0..=steps {
            wedge.push(point_at(start + sweep * step as f64 / steps as f64, radius));
        }
        area.draw(&Polygon::new(wedge, PASTEL[i % PASTEL.len()].filled()))?;

        let middle = start + sweep / 2.0;
        area.draw_text(label, &label_style, point_at(middle, radius * 1.15))?;
        area.draw_text(&format!("{:.1}%", percent), &percent_style, point_at(middle, radius * 0.6))?;

        start += sweep;
    }

    Ok(())
}
