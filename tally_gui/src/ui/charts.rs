//! Canvas drawing for the dashboard charts
//!
//! Renders the category breakdown donut and the asset/debt trend lines from
//! the shaped views on the render surface. Chart geometry is cached; the
//! trend hover layer (guide line, point highlights, tooltip) is redrawn per
//! frame on top of the cache.

use iced::widget::canvas::{self, path, Frame, Geometry, Path, Stroke, Text};
use iced::widget::{column, container, row, text, Space};
use iced::{mouse, Color, Element, Event, Length, Point, Radians, Rectangle, Renderer, Theme};

use tally_core::breakdown::BreakdownView;
use tally_core::color::{ASSET_COLOR, DEBT_COLOR, NEUTRAL_COLOR};
use tally_core::trend::{TrendPoint, TrendView};

use crate::ui::{legend, tint};
use crate::{App, Message};

/// Arcs narrower than this are skipped (zero-amount slices)
const MIN_SWEEP: f32 = 1e-4;

const MARGIN_LEFT: f32 = 48.0;
const MARGIN_RIGHT: f32 = 12.0;
const MARGIN_TOP: f32 = 12.0;
const MARGIN_BOTTOM: f32 = 26.0;

/// Render the side-by-side chart sections
pub fn view_charts(app: &App) -> Element<'_, Message> {
    let breakdown = container(
        column![
            text("Spending by Category").size(14),
            Space::new().height(8),
            canvas(DonutChart {
                view: app.surface.breakdown(),
                cache: app.surface.donut_cache(),
            })
            .width(Length::Fill)
            .height(Length::Fixed(230.0)),
            Space::new().height(8),
            legend::view_legend(app.surface.breakdown()),
        ],
    )
    .padding(12)
    .style(container::bordered_box)
    .width(Length::FillPortion(1));

    let trend = container(
        column![
            text("Assets vs Debts").size(14),
            Space::new().height(8),
            canvas(TrendChart {
                view: app.surface.trend(),
                symbol: app.presenter.symbol(),
                cache: app.surface.trend_cache(),
                hovered: app.trend_hover,
            })
            .width(Length::Fill)
            .height(Length::Fixed(260.0)),
            Space::new().height(8),
            view_trend_footer(app),
        ],
    )
    .padding(12)
    .style(container::bordered_box)
    .width(Length::FillPortion(1));

    row![breakdown, trend].spacing(16).into()
}

/// Investment footer under the trend chart. The percentage tracks the
/// hovered point, falling back to the latest month.
fn view_trend_footer(app: &App) -> Element<'_, Message> {
    let TrendView::Chart { points, footer: Some(footer), .. } = app.surface.trend() else {
        return Space::new().into();
    };
    let asset_value = app
        .trend_hover
        .and_then(|i| points.get(i))
        .or_else(|| points.last())
        .map(|p| p.asset)
        .unwrap_or(0.0);
    text(footer.label_for(asset_value, app.presenter.symbol()))
        .size(11)
        .color([0.5, 0.5, 0.5])
        .into()
}

fn draw_placeholder(frame: &mut Frame, message: &str, color: Color) {
    let placeholder = Text {
        content: message.to_string(),
        position: frame.center(),
        color,
        size: iced::Pixels(13.0),
        align_x: iced::alignment::Horizontal::Center.into(),
        ..Text::default()
    };
    frame.fill_text(placeholder);
}

// ============================================================================
// DONUT
// ============================================================================

/// Canvas program for the category breakdown donut
pub struct DonutChart<'a> {
    pub view: &'a BreakdownView,
    pub cache: &'a canvas::Cache,
}

impl canvas::Program<Message> for DonutChart<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let palette = theme.extended_palette();
        let text_color = palette.background.base.text;
        let muted = tint(NEUTRAL_COLOR);

        let chart = self.cache.draw(renderer, bounds.size(), |frame| {
            let (slices, formatted_total) = match self.view {
                BreakdownView::Placeholder(message) => {
                    draw_placeholder(frame, message, muted);
                    return;
                }
                BreakdownView::Chart {
                    slices,
                    formatted_total,
                    ..
                } => (slices, formatted_total),
            };

            let center = frame.center();
            let outer = (bounds.width.min(bounds.height)) / 2.0 - 8.0;
            let thickness = outer * 0.38;
            let radius = outer - thickness / 2.0;

            for slice in slices {
                if slice.end_angle - slice.start_angle < MIN_SWEEP {
                    continue;
                }
                let arc = Path::new(|builder| {
                    builder.arc(path::Arc {
                        center,
                        radius,
                        start_angle: Radians(slice.start_angle),
                        end_angle: Radians(slice.end_angle),
                    });
                });
                frame.stroke(
                    &arc,
                    Stroke::default()
                        .with_color(tint(slice.color))
                        .with_width(thickness),
                );
            }

            // Total in the hole
            let caption = Text {
                content: "Total".to_string(),
                position: Point::new(center.x, center.y - 16.0),
                color: muted,
                size: iced::Pixels(10.0),
                align_x: iced::alignment::Horizontal::Center.into(),
                ..Text::default()
            };
            frame.fill_text(caption);

            let total = Text {
                content: formatted_total.clone(),
                position: Point::new(center.x, center.y - 2.0),
                color: text_color,
                size: iced::Pixels(15.0),
                align_x: iced::alignment::Horizontal::Center.into(),
                ..Text::default()
            };
            frame.fill_text(total);
        });

        vec![chart]
    }
}

// ============================================================================
// TREND
// ============================================================================

/// Canvas program for the dual-line asset/debt trend
pub struct TrendChart<'a> {
    pub view: &'a TrendView,
    pub symbol: &'a str,
    pub cache: &'a canvas::Cache,
    /// Hovered point index, owned by the app so the footer can follow it
    pub hovered: Option<usize>,
}

impl TrendChart<'_> {
    fn plot(bounds: &Rectangle) -> Rectangle {
        Rectangle {
            x: MARGIN_LEFT,
            y: MARGIN_TOP,
            width: (bounds.width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (bounds.height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
        }
    }

    fn x_at(plot: &Rectangle, count: usize, index: usize) -> f32 {
        if count <= 1 {
            return plot.x + plot.width / 2.0;
        }
        plot.x + plot.width * (index as f32) / ((count - 1) as f32)
    }

    fn y_at(plot: &Rectangle, lo: f64, hi: f64, value: f64) -> f32 {
        let span = (hi - lo).max(f64::EPSILON);
        let normalized = ((value - lo) / span) as f32;
        plot.y + plot.height * (1.0 - normalized)
    }

    /// Nearest point index for a cursor x position inside the plot
    fn index_at(plot: &Rectangle, count: usize, x: f32) -> Option<usize> {
        if count == 0 || x < plot.x - 4.0 || x > plot.x + plot.width + 4.0 {
            return None;
        }
        if count == 1 {
            return Some(0);
        }
        let step = plot.width / ((count - 1) as f32);
        let index = ((x - plot.x) / step).round() as i64;
        Some(index.clamp(0, count as i64 - 1) as usize)
    }

    fn draw_series(
        &self,
        frame: &mut Frame,
        plot: &Rectangle,
        points: &[TrendPoint],
        lo: f64,
        hi: f64,
        values: impl Fn(&TrendPoint) -> f64,
        color: Color,
    ) {
        if points.len() > 1 {
            let line = Path::new(|builder| {
                for (i, point) in points.iter().enumerate() {
                    let at = Point::new(
                        Self::x_at(plot, points.len(), i),
                        Self::y_at(plot, lo, hi, values(point)),
                    );
                    if i == 0 {
                        builder.move_to(at);
                    } else {
                        builder.line_to(at);
                    }
                }
            });
            frame.stroke(&line, Stroke::default().with_color(color).with_width(2.0));
        }

        for (i, point) in points.iter().enumerate() {
            let at = Point::new(
                Self::x_at(plot, points.len(), i),
                Self::y_at(plot, lo, hi, values(point)),
            );
            frame.fill(&Path::circle(at, 3.0), color);
        }
    }

    fn draw_tooltip(&self, frame: &mut Frame, plot: &Rectangle, point: &TrendPoint, x: f32, y: f32) {
        let asset_line = format!("Assets: {}", point.asset_label);
        let debt_line = format!("Debts: {}", point.debt_label);
        let widest = point
            .month
            .len()
            .max(asset_line.len())
            .max(debt_line.len());

        let width = 14.0 + 6.4 * widest as f32;
        let height = 52.0;
        let mut box_x = x + 12.0;
        if box_x + width > plot.x + plot.width {
            box_x = x - 12.0 - width;
        }
        let box_y = (y - height / 2.0)
            .max(plot.y)
            .min(plot.y + plot.height - height);

        frame.fill(
            &Path::rectangle(Point::new(box_x, box_y), iced::Size::new(width, height)),
            Color::from_rgba(0.13, 0.13, 0.16, 0.92),
        );

        let lines = [
            (point.month.clone(), Color::WHITE, 11.0),
            (asset_line, tint(ASSET_COLOR), 10.0),
            (debt_line, tint(DEBT_COLOR), 10.0),
        ];
        for (i, (content, color, size)) in lines.into_iter().enumerate() {
            frame.fill_text(Text {
                content,
                position: Point::new(box_x + 7.0, box_y + 5.0 + 15.0 * i as f32),
                color,
                size: iced::Pixels(size),
                ..Text::default()
            });
        }
    }
}

impl canvas::Program<Message> for TrendChart<'_> {
    /// Last hover index this canvas reported, to publish only on change
    type State = Option<usize>;

    fn update(
        &self,
        state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let TrendView::Chart { points, .. } = self.view else {
            return None;
        };
        match event {
            Event::Mouse(mouse::Event::CursorMoved { .. })
            | Event::Mouse(mouse::Event::CursorLeft) => {
                let plot = Self::plot(&bounds);
                let hovered = cursor
                    .position_in(bounds)
                    .and_then(|p| Self::index_at(&plot, points.len(), p.x));
                if hovered != *state {
                    *state = hovered;
                    return Some(canvas::Action::publish(Message::TrendHovered(hovered)));
                }
                None
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let palette = theme.extended_palette();
        let text_color = palette.background.base.text;
        let grid_color = palette.background.weak.color;
        let muted = tint(NEUTRAL_COLOR);

        let chart = self.cache.draw(renderer, bounds.size(), |frame| {
            let (points, lo, hi, ticks) = match self.view {
                TrendView::Placeholder(message) => {
                    draw_placeholder(frame, message, muted);
                    return;
                }
                TrendView::Chart {
                    points,
                    lo,
                    hi,
                    ticks,
                    ..
                } => (points, *lo, *hi, ticks),
            };
            let plot = Self::plot(&bounds);

            // Gridlines and compact value labels
            for tick in ticks {
                let y = Self::y_at(&plot, lo, hi, tick.value);
                let gridline = Path::line(
                    Point::new(plot.x, y),
                    Point::new(plot.x + plot.width, y),
                );
                frame.stroke(
                    &gridline,
                    Stroke::default().with_color(grid_color).with_width(1.0),
                );
                frame.fill_text(Text {
                    content: tick.label.clone(),
                    position: Point::new(plot.x - 6.0, y - 5.0),
                    color: muted,
                    size: iced::Pixels(9.0),
                    align_x: iced::alignment::Horizontal::Right.into(),
                    ..Text::default()
                });
            }

            // Month labels, thinned when the axis gets crowded
            let stride = (points.len() / 9).max(1);
            for (i, point) in points.iter().enumerate() {
                if i % stride != 0 {
                    continue;
                }
                frame.fill_text(Text {
                    content: point.month.clone(),
                    position: Point::new(
                        Self::x_at(&plot, points.len(), i),
                        plot.y + plot.height + 6.0,
                    ),
                    color: muted,
                    size: iced::Pixels(9.0),
                    align_x: iced::alignment::Horizontal::Center.into(),
                    ..Text::default()
                });
            }

            self.draw_series(frame, &plot, points, lo, hi, |p| p.asset, tint(ASSET_COLOR));
            self.draw_series(frame, &plot, points, lo, hi, |p| p.debt, tint(DEBT_COLOR));

            // Series key, top-right corner of the plot
            let key_entries = [("Assets", tint(ASSET_COLOR)), ("Debts", tint(DEBT_COLOR))];
            for (i, (label, color)) in key_entries.into_iter().enumerate() {
                let y = plot.y + 4.0 + 13.0 * i as f32;
                let swatch = Path::rectangle(
                    Point::new(plot.x + plot.width - 58.0, y + 2.0),
                    iced::Size::new(8.0, 8.0),
                );
                frame.fill(&swatch, color);
                frame.fill_text(Text {
                    content: label.to_string(),
                    position: Point::new(plot.x + plot.width - 46.0, y),
                    color: text_color,
                    size: iced::Pixels(9.0),
                    ..Text::default()
                });
            }
        });

        // Hover layer drawn fresh each frame
        let TrendView::Chart { points, lo, hi, .. } = self.view else {
            return vec![chart];
        };
        let Some(point) = self.hovered.and_then(|i| points.get(i)) else {
            return vec![chart];
        };

        let mut overlay = Frame::new(renderer, bounds.size());
        let plot = Self::plot(&bounds);
        let index = self.hovered.unwrap_or(0);
        let x = Self::x_at(&plot, points.len(), index);

        let guide = Path::line(
            Point::new(x, plot.y),
            Point::new(x, plot.y + plot.height),
        );
        overlay.stroke(
            &guide,
            Stroke::default().with_color(grid_color).with_width(1.0),
        );

        let asset_y = Self::y_at(&plot, *lo, *hi, point.asset);
        let debt_y = Self::y_at(&plot, *lo, *hi, point.debt);
        overlay.stroke(
            &Path::circle(Point::new(x, asset_y), 4.5),
            Stroke::default().with_color(tint(ASSET_COLOR)).with_width(2.0),
        );
        overlay.stroke(
            &Path::circle(Point::new(x, debt_y), 4.5),
            Stroke::default().with_color(tint(DEBT_COLOR)).with_width(2.0),
        );

        self.draw_tooltip(&mut overlay, &plot, point, x, asset_y);

        vec![chart, overlay.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if matches!(self.view, TrendView::Chart { .. }) && cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}
