use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use simcore::{Series, Trace};

const SETPOINT_COLOR: Color32 = Color32::from_rgb(120, 120, 120);
const RPM_COLOR: Color32 = Color32::from_rgb(70, 130, 180);

pub fn points(trace: &Trace, series: Series) -> PlotPoints<'_> {
    let (t, values) = trace.series(series);
    PlotPoints::from_iter(
        t.iter()
            .copied()
            .zip(values.iter().copied())
            .map(|(x, y)| [x, y]),
    )
}

fn plot(id: &str, width: f32) -> Plot<'static> {
    Plot::new(id)
        .width(width)
        .allow_scroll(false)
        .allow_drag(false)
        .allow_zoom(false)
        .x_axis_label("Time (s)")
}

pub fn show(ui: &mut egui::Ui, trace: &Trace) {
    ui.horizontal(|ui| {
        let spacing = ui.spacing().item_spacing.x * 3.0;
        // rpm gets twice the room of the others
        let unit = ((ui.available_width() - spacing) / 5.0).max(40.0);

        ui.vertical(|ui| {
            ui.label("RPM (setpoint vs measured)");
            plot("rpm_plot", unit * 2.0)
                .legend(Legend::default())
                .include_y(0.0)
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new("setpoint", points(trace, Series::RpmSetpoint)).color(SETPOINT_COLOR));
                    plot_ui.line(Line::new("rpm", points(trace, Series::Rpm)).color(RPM_COLOR));
                });
        });

        ui.vertical(|ui| {
            ui.label("PWM / Command");
            plot("pwm_plot", unit)
                .include_y(-1.0)
                .include_y(1.0)
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new("pwm", points(trace, Series::Pwm)));
                });
        });

        ui.vertical(|ui| {
            ui.label("Error");
            plot("err_plot", unit).show(ui, |plot_ui| {
                plot_ui.line(Line::new("err", points(trace, Series::Err)));
            });
        });

        ui.vertical(|ui| {
            ui.label("Tension (simulated)");
            plot("tension_plot", unit)
                .include_y(0.0)
                .include_y(1.0)
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new("tension", points(trace, Series::Tension)));
                });
        });
    });
}
