use std::sync::mpsc;

use eframe::egui;

use crate::config;
use crate::engine::{self, RunConfig, Target};
use crate::resolver::{self, StorageRoot};
use crate::utils;

/// Messages sent from the reclamation thread to the UI thread.
enum BgMessage {
    Log(String),
    RunComplete(u64),
}

/// Per-target state held by the GUI.
struct TargetRow {
    target: Target,
    /// Whether the target's cache root currently resolves under any
    /// configured storage root. Unavailable targets cannot be toggled.
    available: bool,
}

pub struct CacheSweepApp {
    storage_base: std::path::PathBuf,
    roots: Vec<StorageRoot>,
    grants: Vec<String>,
    targets: Vec<TargetRow>,
    running: bool,
    receiver: Option<mpsc::Receiver<BgMessage>>,
    /// Newest line first, the way the log view renders.
    log_lines: Vec<String>,
    last_reclaimed: Option<u64>,
}

impl CacheSweepApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let storage_base = std::path::PathBuf::from(config::STORAGE_BASE);
        let volumes = config::discover_volumes(&storage_base);
        let grants = config::load_grants();
        let roots = config::storage_roots(&volumes, &grants);

        let mut app = Self {
            storage_base,
            roots,
            grants,
            targets: config::default_targets()
                .into_iter()
                .map(|target| TargetRow {
                    target,
                    available: false,
                })
                .collect(),
            running: false,
            receiver: None,
            log_lines: vec![],
            last_reclaimed: None,
        };
        app.refresh_availability();
        app
    }

    /// Re-probes every target and syncs the switches, mirroring what a
    /// grant change or an external cache wipe would make reachable.
    fn refresh_availability(&mut self) {
        for row in &mut self.targets {
            row.available = resolver::resolve_cache_root(
                &self.storage_base,
                &self.roots,
                &row.target.cache_path(),
                None,
            )
            .is_some();
            row.target.enabled = row.available;
        }
    }

    fn start_clean(&mut self) {
        self.running = true;
        self.last_reclaimed = None;

        let config = RunConfig {
            storage_base: self.storage_base.clone(),
            roots: self.roots.clone(),
            targets: self.targets.iter().map(|row| row.target.clone()).collect(),
            // No document provider is wired into the desktop build; grants
            // only take effect on hosts that attach one.
            provider: None,
        };

        let (tx, rx) = mpsc::channel::<BgMessage>();
        self.receiver = Some(rx);

        std::thread::spawn(move || {
            let total = engine::run(&config, &|line| {
                let _ = tx.send(BgMessage::Log(line));
            });
            let _ = tx.send(BgMessage::RunComplete(total));
        });
    }

    fn drain_messages(&mut self) {
        let mut run_finished = false;
        if let Some(ref rx) = self.receiver {
            while let Ok(msg) = rx.try_recv() {
                match msg {
                    BgMessage::Log(line) => {
                        self.log_lines.insert(0, line);
                    }
                    BgMessage::RunComplete(total) => {
                        self.last_reclaimed = Some(total);
                        self.running = false;
                        run_finished = true;
                    }
                }
            }
        }
        if run_finished {
            self.receiver = None;
            self.refresh_availability();
        }
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            ui.heading(
                egui::RichText::new("CacheSweep")
                    .size(28.0)
                    .strong()
                    .color(egui::Color32::from_rgb(80, 180, 220)),
            );
            ui.label(
                egui::RichText::new("Shared download cache cleanup")
                    .size(14.0)
                    .color(egui::Color32::GRAY),
            );
        });
        ui.add_space(8.0);
    }

    fn render_targets(&mut self, ui: &mut egui::Ui) {
        let running = self.running;
        for row in &mut self.targets {
            ui.horizontal(|ui| {
                ui.add_enabled(
                    row.available && !running,
                    egui::Checkbox::new(&mut row.target.enabled, &row.target.label),
                );
                if !row.available {
                    ui.label(
                        egui::RichText::new("not found")
                            .italics()
                            .color(egui::Color32::GRAY),
                    );
                }
            });
        }
    }

    fn render_action_bar(&mut self, ui: &mut egui::Ui) {
        let any_enabled = self
            .targets
            .iter()
            .any(|row| row.available && row.target.enabled);

        ui.horizontal(|ui| {
            ui.add_space(4.0);
            if ui
                .add_enabled(
                    !self.running && any_enabled,
                    egui::Button::new(
                        egui::RichText::new("Clean").strong().color(
                            if !self.running && any_enabled {
                                egui::Color32::from_rgb(220, 60, 60)
                            } else {
                                egui::Color32::GRAY
                            },
                        ),
                    ),
                )
                .clicked()
            {
                self.start_clean();
            }

            if self.running {
                ui.add_space(8.0);
                ui.spinner();
                ui.label("Cleaning...");
            }
        });

        if let Some(total) = self.last_reclaimed {
            ui.horizontal(|ui| {
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(format!(
                        "Last run reclaimed: {}",
                        utils::size_readable(total)
                    ))
                    .color(egui::Color32::from_rgb(80, 200, 80)),
                );
            });
        }
        ui.add_space(4.0);
    }

    fn render_grants(&self, ui: &mut egui::Ui) {
        if self.grants.is_empty() {
            ui.label(
                egui::RichText::new("No storage grants configured; using direct volume access.")
                    .small()
                    .color(egui::Color32::GRAY),
            );
        } else {
            ui.label(
                egui::RichText::new(format!(
                    "Storage grants: {}",
                    self.grants.join(", ")
                ))
                .small()
                .color(egui::Color32::GRAY),
            );
        }
    }

    fn render_log(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if self.log_lines.is_empty() {
                    ui.label(
                        egui::RichText::new("Nothing cleaned yet.")
                            .italics()
                            .color(egui::Color32::GRAY),
                    );
                    return;
                }
                for line in &self.log_lines {
                    ui.label(
                        egui::RichText::new(line)
                            .color(egui::Color32::from_rgb(160, 160, 170)),
                    );
                }
            });
    }
}

impl eframe::App for CacheSweepApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_messages();

        if self.running {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_header(ui);
            self.render_targets(ui);
            ui.separator();
            self.render_action_bar(ui);
            self.render_grants(ui);
            ui.separator();
            self.render_log(ui);
        });
    }
}
