use std::io::Write;
use std::path::{Path, PathBuf};

use vgw_core::operators::{self, AddOutcome, GroupChoice};
use vgw_core::panel::{AssignRequest, panel_model};
use vgw_core::scene::{Camera, Scene};
use vgw_core::{HostContext, OverlayController, Viewport};
use vgw_overlay::{FrameDriver, FrameReport, PixmapSurface};
use vgw_types::{AppConfig, PanelSettings};

use crate::CliError;

/// A scene file opened as a live viewport
pub struct SceneFile {
    path: PathBuf,
    camera: Option<Camera>,
    pub viewport: Viewport,
}

impl SceneFile {
    pub fn open(path: &Path) -> Result<Self, CliError> {
        let scene = Scene::load(path)?;
        let camera = scene.view.camera;
        Ok(Self {
            path: path.to_path_buf(),
            camera,
            viewport: scene.into_viewport(),
        })
    }

    /// Write back to `output`, or over the source file
    pub fn save(&self, output: Option<&Path>) -> Result<(), CliError> {
        let path = output.unwrap_or(&self.path);
        Scene::from_viewport(&self.viewport, self.camera).save(path)?;
        tracing::info!(path = %path.display(), "Scene written");
        Ok(())
    }

    /// The given vertex, or the active one
    fn target_vertex(&self, vertex: Option<u32>) -> Result<u32, CliError> {
        vertex
            .or_else(|| self.viewport.mesh().active_vertex())
            .ok_or(CliError::NoActiveVertex)
    }
}

/// Parse a `GROUP=WEIGHT` pair
pub fn parse_weight_pair(s: &str) -> Result<(u32, f32), String> {
    let (group, weight) = s
        .split_once('=')
        .ok_or_else(|| format!("expected GROUP=WEIGHT, got '{}'", s))?;
    let group = group
        .trim()
        .parse()
        .map_err(|e| format!("invalid group index '{}': {}", group, e))?;
    let weight = weight
        .trim()
        .parse()
        .map_err(|e| format!("invalid weight '{}': {}", weight, e))?;
    Ok((group, weight))
}

/// Toggle the overlay on, run one frame and write it as a PNG
pub fn render(scene: &Path, output: &Path, config: &AppConfig) -> Result<FrameReport, CliError> {
    let mut file = SceneFile::open(scene)?;
    let viewport = &mut file.viewport;

    let mut controller = OverlayController::new();
    controller.toggle(viewport)?;

    let region = viewport.region();
    let mut surface = PixmapSurface::new(region.width, region.height)?;
    let driver = FrameDriver::new(config.overlay.clone(), controller.flag());
    let report = driver.run_frame(viewport, &mut surface);
    controller.shutdown(viewport);

    surface.save_png(output)?;
    tracing::info!(
        path = %output.display(),
        lines = report.lines_drawn,
        "Overlay frame written"
    );
    Ok(report)
}

/// Print the side panel for the current selection
pub fn panel(
    scene: &Path,
    show_all: bool,
    config: &AppConfig,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let file = SceneFile::open(scene)?;
    let settings = PanelSettings {
        show_all_selected: show_all || config.panel.show_all_selected,
    };
    // every invocation starts with the overlay off
    let model = panel_model(file.viewport.mesh(), false, &settings);
    for line in model.to_lines(config.overlay.weight_precision) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Print the groups a vertex can be added to
pub fn groups(scene: &Path, vertex: Option<u32>, out: &mut dyn Write) -> Result<(), CliError> {
    let file = SceneFile::open(scene)?;
    let vertex = file.target_vertex(vertex)?;
    let candidates = operators::available_groups(file.viewport.mesh(), vertex)
        .map_err(vgw_core::OperatorError::from)?;
    for candidate in candidates {
        match candidate.choice {
            GroupChoice::NewGroup => writeln!(out, "new\t{}", candidate.label)?,
            GroupChoice::Existing(index) => writeln!(out, "{}\t{}", index, candidate.label)?,
        }
    }
    Ok(())
}

pub fn add(
    scene: &Path,
    vertex: Option<u32>,
    choice: GroupChoice,
    output: Option<&Path>,
) -> Result<AddOutcome, CliError> {
    let mut file = SceneFile::open(scene)?;
    let vertex = file.target_vertex(vertex)?;
    let outcome = operators::add_to_group(&mut file.viewport, vertex, choice)?;
    if let AddOutcome::Assigned { .. } = outcome {
        file.save(output)?;
    }
    Ok(outcome)
}

pub fn remove(
    scene: &Path,
    vertex: Option<u32>,
    group: u32,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let mut file = SceneFile::open(scene)?;
    let vertex = file.target_vertex(vertex)?;
    operators::remove_from_group(&mut file.viewport, vertex, group)?;
    file.save(output)
}

pub fn assign(
    scene: &Path,
    vertex: Option<u32>,
    weights: &[(u32, f32)],
    output: Option<&Path>,
) -> Result<usize, CliError> {
    let mut file = SceneFile::open(scene)?;
    let request = AssignRequest {
        vertex_index: file.target_vertex(vertex)?,
        weights: weights.iter().copied().collect(),
    };
    let written = operators::assign_weights(&mut file.viewport, &request)?;
    file.save(output)?;
    Ok(written)
}
