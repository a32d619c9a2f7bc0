//! Interaction controller: turns pointer input and editor calls into scene
//! mutations and history commits.

use crate::config::CanvasConfig;
use crate::elements::{
    Arrow, Circle, Element, ElementId, ElementPatch, ElementStyle, Freehand, Image, Note,
    Rectangle, SerializableColor, Text,
};
use crate::history::History;
use crate::import::{ImportError, ImportedImage};
use crate::input::PointerEvent;
use crate::project::Project;
use crate::scene::Scene;
use crate::storage::ProjectStore;
use crate::tools::{Action, ToolKind};
use kurbo::Point;

/// What the host should do after an event has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing visible changed.
    None,
    /// The scene changed and should be redrawn.
    SceneChanged,
    /// The host should ask the user for an image and pass its bytes to
    /// [`Canvas::import_image`].
    ImportImageRequested,
}

/// The drawing surface state: scene, history, active tool and gesture.
///
/// Commits happen once per finished user action. Intermediate pointer
/// samples update the scene without touching the history or storage; the
/// project is written when an action commits or a gesture ends.
pub struct Canvas {
    scene: Scene,
    history: History,
    store: ProjectStore,
    config: CanvasConfig,
    tool: ToolKind,
    action: Action,
    selection: Option<ElementId>,
    style: ElementStyle,
}

impl Canvas {
    /// Create a canvas showing the store's active project.
    ///
    /// History starts empty; the loaded scene is not an undo target.
    pub fn new(store: ProjectStore, config: CanvasConfig) -> Self {
        let scene = store.current().elements.clone();
        Self {
            scene,
            history: History::with_config(&config.history),
            store,
            style: config.default_style.clone(),
            config,
            tool: ToolKind::default(),
            action: Action::default(),
            selection: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Element grabbed by the select tool during the current gesture.
    pub fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    /// Style given to new elements.
    pub fn style(&self) -> &ElementStyle {
        &self.style
    }

    /// The active project.
    pub fn project(&self) -> &Project {
        self.store.current()
    }

    pub fn projects(&self) -> &[Project] {
        self.store.projects()
    }

    /// Set the current tool, finishing any gesture in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.finish_gesture();
        log::debug!("Tool: {}", tool.name());
        self.tool = tool;
    }

    /// Set the style for elements created from now on.
    pub fn set_style(&mut self, style: ElementStyle) {
        self.style = style;
    }

    /// Feed one pointer event through the tool state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Effect {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { .. } | PointerEvent::Leave => self.finish_gesture(),
        }
    }

    fn pointer_down(&mut self, point: Point) -> Effect {
        match self.tool {
            ToolKind::Select => {
                if let Some(element) = self.scene.hit_test(point).filter(|e| e.is_selectable()) {
                    log::debug!("Selected element {}", element.id());
                    self.selection = Some(element.id());
                    self.action = Action::Moving;
                }
                Effect::None
            }
            ToolKind::Eraser => {
                self.action = Action::Erasing;
                if self.erase_at(point) {
                    self.commit();
                    Effect::SceneChanged
                } else {
                    Effect::None
                }
            }
            ToolKind::Text | ToolKind::Note => {
                let id = self.store.allocate_id();
                let element = if self.tool == ToolKind::Text {
                    Element::Text(Text::new(id, point, Text::DEFAULT_CONTENT, self.style.clone()))
                } else {
                    let style = ElementStyle {
                        color: self.config.note_color,
                        ..self.style.clone()
                    };
                    Element::Note(Note::new(id, point, Note::DEFAULT_CONTENT, style))
                };
                self.set_scene(self.scene.append(element));
                self.commit();
                Effect::SceneChanged
            }
            ToolKind::Image => Effect::ImportImageRequested,
            ToolKind::Pen | ToolKind::Rectangle | ToolKind::Circle | ToolKind::Arrow => {
                let id = self.store.allocate_id();
                let style = self.style.clone();
                let element = match self.tool {
                    ToolKind::Pen => Element::Path(Freehand::new(id, point, style)),
                    ToolKind::Rectangle => Element::Rectangle(Rectangle::new(id, point, point, style)),
                    ToolKind::Circle => Element::Circle(Circle::new(id, point, point, style)),
                    _ => Element::Arrow(Arrow::new(id, point, point, style)),
                };
                log::debug!("Drawing {:?} {id}", element.kind());
                self.set_scene(self.scene.append(element));
                self.action = Action::Drawing;
                Effect::SceneChanged
            }
        }
    }

    fn pointer_move(&mut self, point: Point) -> Effect {
        match self.action {
            Action::None | Action::Moving => Effect::None,
            // Drag-erasing is not committed; the next commit picks it up.
            Action::Erasing => {
                if self.erase_at(point) {
                    Effect::SceneChanged
                } else {
                    Effect::None
                }
            }
            Action::Drawing => {
                let scene = self.scene.map_last(|element| match element {
                    Element::Path(path) => path.add_point(point),
                    other => other.apply_patch(&ElementPatch::default().end_point(point)),
                });
                self.set_scene(scene);
                Effect::SceneChanged
            }
        }
    }

    /// End the current gesture. A drawn element is committed here, and
    /// uncommitted erasures or overlay drags are written out.
    fn finish_gesture(&mut self) -> Effect {
        if self.action == Action::Drawing {
            self.commit();
        }
        self.action = Action::None;
        self.selection = None;
        self.flush();
        Effect::None
    }

    fn erase_at(&mut self, point: Point) -> bool {
        let Some(id) = self.scene.hit_test(point).map(Element::id) else {
            return false;
        };
        log::debug!("Erased element {id}");
        self.set_scene(self.scene.remove_by_id(id));
        true
    }

    /// Merge `patch` into an element and commit. Returns `false` for unknown ids.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        if !self.update_element_transient(id, patch) {
            return false;
        }
        self.commit();
        true
    }

    /// Merge `patch` into an element without a history entry.
    ///
    /// Used while an overlay is being dragged or resized. The change is
    /// written at the next commit, gesture end or [`flush`](Self::flush).
    pub fn update_element_transient(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        if self.scene.get(id).is_none() {
            return false;
        }
        self.set_scene(self.scene.update_by_id(id, patch));
        true
    }

    /// Replace the text of a text or note element.
    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) -> bool {
        self.update_element(id, &ElementPatch::default().text(text))
    }

    /// Set the box size of a text, note or image element.
    pub fn resize(&mut self, id: ElementId, width: f64, height: f64) -> bool {
        self.update_element(id, &ElementPatch::default().size(width, height))
    }

    pub fn recolor(&mut self, id: ElementId, color: SerializableColor) -> bool {
        self.update_element(id, &ElementPatch::default().color(color))
    }

    /// Set the rotation of an image, in degrees.
    pub fn rotate(&mut self, id: ElementId, degrees: f64) -> bool {
        self.update_element(id, &ElementPatch::default().rotation(degrees))
    }

    /// Remove an element and commit. Returns `false` for unknown ids.
    pub fn delete_element(&mut self, id: ElementId) -> bool {
        if self.scene.get(id).is_none() {
            return false;
        }
        if self.selection == Some(id) {
            self.selection = None;
        }
        self.set_scene(self.scene.remove_by_id(id));
        self.commit();
        true
    }

    /// Remove every element and commit. An empty scene is left alone.
    pub fn clear_scene(&mut self) -> bool {
        if self.scene.is_empty() {
            return false;
        }
        self.finish_gesture();
        self.set_scene(Scene::new());
        self.commit();
        true
    }

    /// Decode image bytes and place them centered in the viewport.
    ///
    /// On error the scene is untouched.
    pub fn import_image(&mut self, data: &[u8]) -> Result<ElementId, ImportError> {
        let imported = ImportedImage::decode(data)
            .inspect_err(|e| log::warn!("Image import failed: {e}"))?;
        let placement = imported.placement(self.config.viewport, self.config.import_limit());
        let id = self.store.allocate_id();
        let image = Image::new(
            id,
            placement.origin(),
            imported.src,
            placement.size(),
            self.style.clone(),
        );
        log::info!(
            "Imported {}x{} image as {id}",
            imported.source_size.width,
            imported.source_size.height
        );
        self.set_scene(self.scene.append(Element::Image(image)));
        self.commit();
        Ok(id)
    }

    /// Step back one commit. Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.finish_gesture();
        let Some(scene) = self.history.undo().cloned() else {
            return false;
        };
        self.set_scene(scene);
        self.flush();
        true
    }

    /// Step forward one commit. Returns `false` if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.finish_gesture();
        let Some(scene) = self.history.redo().cloned() else {
            return false;
        };
        self.set_scene(scene);
        self.flush();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Create a project and open it. Returns the new project's id.
    pub fn create_project(&mut self, name: Option<&str>) -> String {
        let id = self.store.create(name).id.clone();
        self.load_current();
        id
    }

    /// Open the project with `id`. Unknown ids are ignored.
    pub fn switch_project(&mut self, id: &str) -> bool {
        if self.store.current().id == id {
            return true;
        }
        if !self.store.switch(id) {
            return false;
        }
        self.load_current();
        true
    }

    pub fn rename_project(&mut self, id: &str, name: &str) -> bool {
        self.store.rename(id, name)
    }

    /// Delete a project. Deleting the open project opens another one.
    pub fn delete_project(&mut self, id: &str) -> bool {
        let open = self.store.current().id.clone();
        if !self.store.delete(id) {
            return false;
        }
        if self.store.current().id != open {
            self.load_current();
        }
        true
    }

    fn load_current(&mut self) {
        self.finish_gesture();
        self.scene = self.store.current().elements.clone();
        self.history.clear();
        log::info!("Opened project '{}'", self.store.current().name);
    }

    /// Write pending scene changes to storage. Returns `false` if there were none.
    pub fn flush(&mut self) -> bool {
        self.store.flush()
    }

    fn set_scene(&mut self, scene: Scene) {
        self.scene = scene;
        self.store.scene_changed(&self.scene);
    }

    fn commit(&mut self) {
        self.history.commit(self.scene.clone());
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::ElementKind;
    use crate::storage::{MemoryStorage, PROJECTS_KEY, Storage, StorageResult};
    use kurbo::Size;
    use std::io::Cursor;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Memory storage that counts writes.
    #[derive(Default)]
    struct CountingStorage {
        inner: MemoryStorage,
        saves: AtomicUsize,
    }

    impl CountingStorage {
        fn saves(&self) -> usize {
            self.saves.load(Ordering::SeqCst)
        }
    }

    impl Storage for CountingStorage {
        fn save(&self, key: &str, value: &str) -> StorageResult<()> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            self.inner.save(key, value)
        }

        fn load(&self, key: &str) -> StorageResult<String> {
            self.inner.load(key)
        }

        fn exists(&self, key: &str) -> StorageResult<bool> {
            self.inner.exists(key)
        }
    }

    fn saved_scene_len(storage: Arc<CountingStorage>) -> usize {
        ProjectStore::open(storage, "Untitled").current().elements.len()
    }

    fn canvas() -> Canvas {
        canvas_with(Arc::new(MemoryStorage::new()))
    }

    fn canvas_with(storage: Arc<dyn Storage>) -> Canvas {
        let config = CanvasConfig {
            viewport: Size::new(1000.0, 800.0),
            ..CanvasConfig::default()
        };
        let store = ProjectStore::open(storage, config.default_project_name.clone());
        Canvas::new(store, config)
    }

    fn drag(canvas: &mut Canvas, from: (f64, f64), to: (f64, f64)) {
        canvas.handle_pointer(PointerEvent::down(from.0, from.1));
        canvas.handle_pointer(PointerEvent::moved(to.0, to.1));
        canvas.handle_pointer(PointerEvent::up(to.0, to.1));
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        image::DynamicImage::new_rgba8(width, height)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_draw_rectangle_commits_once() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Rectangle);

        assert_eq!(canvas.handle_pointer(PointerEvent::down(0.0, 0.0)), Effect::SceneChanged);
        assert_eq!(canvas.action(), Action::Drawing);
        canvas.handle_pointer(PointerEvent::moved(40.0, 20.0));
        canvas.handle_pointer(PointerEvent::moved(100.0, 50.0));
        assert!(canvas.history().is_empty());
        canvas.handle_pointer(PointerEvent::up(100.0, 50.0));

        assert_eq!(canvas.action(), Action::None);
        assert_eq!(canvas.history().len(), 1);
        let Some(Element::Rectangle(rect)) = canvas.scene().last() else {
            panic!("expected a rectangle");
        };
        assert_eq!(rect.end_point, Point::new(100.0, 50.0));
        assert!(canvas.scene().hit_test(Point::new(50.0, 25.0)).is_some());
        assert!(canvas.scene().hit_test(Point::new(150.0, 25.0)).is_none());
    }

    #[test]
    fn test_pen_stroke_collects_points() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Pen);
        canvas.handle_pointer(PointerEvent::down(0.0, 0.0));
        canvas.handle_pointer(PointerEvent::moved(5.0, 0.0));
        canvas.handle_pointer(PointerEvent::moved(10.0, 0.0));
        canvas.handle_pointer(PointerEvent::Leave);

        let Some(Element::Path(path)) = canvas.scene().last() else {
            panic!("expected a path");
        };
        assert_eq!(path.len(), 3);
        assert_eq!(canvas.history().len(), 1);
        assert!(canvas.scene().hit_test(Point::new(5.0, 1.0)).is_some());
    }

    #[test]
    fn test_new_elements_use_current_style() {
        let mut canvas = canvas();
        let style = ElementStyle::new(SerializableColor::new(255, 0, 0, 255), 6.0, 0.5);
        canvas.set_style(style.clone());
        canvas.set_tool(ToolKind::Circle);
        drag(&mut canvas, (0.0, 0.0), (20.0, 20.0));
        assert_eq!(canvas.scene().last().unwrap().style(), &style);
    }

    #[test]
    fn test_move_without_gesture_is_ignored() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Arrow);
        assert_eq!(canvas.handle_pointer(PointerEvent::moved(5.0, 5.0)), Effect::None);
        assert!(canvas.scene().is_empty());
    }

    #[test]
    fn test_text_and_note_placement() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Text);
        assert_eq!(canvas.handle_pointer(PointerEvent::down(10.0, 10.0)), Effect::SceneChanged);
        assert_eq!(canvas.action(), Action::None);
        canvas.handle_pointer(PointerEvent::up(10.0, 10.0));

        canvas.set_tool(ToolKind::Note);
        canvas.handle_pointer(PointerEvent::down(300.0, 10.0));
        canvas.handle_pointer(PointerEvent::up(300.0, 10.0));

        assert_eq!(canvas.history().len(), 2);
        let kinds: Vec<_> = canvas.scene().iter().map(Element::kind).collect();
        assert_eq!(kinds, vec![ElementKind::Text, ElementKind::Note]);
        let Some(Element::Note(note)) = canvas.scene().last() else {
            panic!("expected a note");
        };
        assert_eq!(note.text, Note::DEFAULT_CONTENT);
        assert_eq!(note.background(), SerializableColor::note_yellow());
        assert_eq!(note.size(), Size::new(200.0, 200.0));
    }

    #[test]
    fn test_image_tool_requests_import() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Image);
        assert_eq!(
            canvas.handle_pointer(PointerEvent::down(0.0, 0.0)),
            Effect::ImportImageRequested
        );
        assert_eq!(canvas.action(), Action::None);
        assert!(canvas.scene().is_empty());
    }

    #[test]
    fn test_select_enters_moving() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Rectangle);
        drag(&mut canvas, (0.0, 0.0), (100.0, 100.0));
        let id = canvas.scene().last().unwrap().id();

        canvas.set_tool(ToolKind::Select);
        canvas.handle_pointer(PointerEvent::down(50.0, 50.0));
        assert_eq!(canvas.selection(), Some(id));
        assert_eq!(canvas.action(), Action::Moving);

        let before = canvas.scene().clone();
        canvas.handle_pointer(PointerEvent::moved(80.0, 80.0));
        assert_eq!(canvas.scene(), &before);

        canvas.handle_pointer(PointerEvent::up(80.0, 80.0));
        assert_eq!(canvas.selection(), None);
        assert_eq!(canvas.history().len(), 1);
    }

    #[test]
    fn test_select_ignores_overlays() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Note);
        canvas.handle_pointer(PointerEvent::down(0.0, 0.0));
        canvas.handle_pointer(PointerEvent::up(0.0, 0.0));

        canvas.set_tool(ToolKind::Select);
        canvas.handle_pointer(PointerEvent::down(50.0, 50.0));
        assert_eq!(canvas.selection(), None);
        assert_eq!(canvas.action(), Action::None);
    }

    #[test]
    fn test_eraser_commits_on_press_only() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Rectangle);
        drag(&mut canvas, (0.0, 0.0), (10.0, 10.0));
        drag(&mut canvas, (100.0, 0.0), (110.0, 10.0));
        assert_eq!(canvas.history().len(), 2);

        canvas.set_tool(ToolKind::Eraser);
        assert_eq!(canvas.handle_pointer(PointerEvent::down(5.0, 5.0)), Effect::SceneChanged);
        assert_eq!(canvas.action(), Action::Erasing);
        assert_eq!(canvas.scene().len(), 1);
        assert_eq!(canvas.history().len(), 3);

        assert_eq!(canvas.handle_pointer(PointerEvent::moved(105.0, 5.0)), Effect::SceneChanged);
        canvas.handle_pointer(PointerEvent::up(105.0, 5.0));
        assert!(canvas.scene().is_empty());
        assert_eq!(canvas.history().len(), 3);
    }

    #[test]
    fn test_eraser_miss_does_not_commit() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Eraser);
        assert_eq!(canvas.handle_pointer(PointerEvent::down(5.0, 5.0)), Effect::None);
        assert!(canvas.history().is_empty());
    }

    #[test]
    fn test_undo_redo() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Rectangle);
        drag(&mut canvas, (0.0, 0.0), (10.0, 10.0));
        drag(&mut canvas, (20.0, 0.0), (30.0, 10.0));

        assert!(canvas.undo());
        assert_eq!(canvas.scene().len(), 1);
        assert!(!canvas.undo());
        assert_eq!(canvas.scene().len(), 1);
        assert!(canvas.redo());
        assert_eq!(canvas.scene().len(), 2);
        assert!(!canvas.redo());
    }

    #[test]
    fn test_commit_after_undo_drops_redo() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Circle);
        drag(&mut canvas, (0.0, 0.0), (10.0, 10.0));
        drag(&mut canvas, (20.0, 0.0), (30.0, 10.0));
        assert!(canvas.undo());
        drag(&mut canvas, (40.0, 0.0), (50.0, 10.0));
        assert!(!canvas.can_redo());
        assert_eq!(canvas.history().len(), 2);
    }

    #[test]
    fn test_update_and_delete() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Text);
        canvas.handle_pointer(PointerEvent::down(0.0, 0.0));
        canvas.handle_pointer(PointerEvent::up(0.0, 0.0));
        let id = canvas.scene().last().unwrap().id();

        assert!(canvas.set_text(id, "hello"));
        assert!(canvas.resize(id, 120.0, 40.0));
        let Some(Element::Text(text)) = canvas.scene().get(id) else {
            panic!("expected text");
        };
        assert_eq!(text.text, "hello");
        assert_eq!(text.size(), Size::new(120.0, 40.0));
        assert_eq!(canvas.history().len(), 3);

        assert!(!canvas.update_element(ElementId(999), &ElementPatch::default().text("x")));
        assert!(!canvas.delete_element(ElementId(999)));
        assert_eq!(canvas.history().len(), 3);

        assert!(canvas.delete_element(id));
        assert!(canvas.scene().is_empty());
        assert_eq!(canvas.history().len(), 4);
    }

    #[test]
    fn test_transient_update_skips_history() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Note);
        canvas.handle_pointer(PointerEvent::down(0.0, 0.0));
        canvas.handle_pointer(PointerEvent::up(0.0, 0.0));
        let id = canvas.scene().last().unwrap().id();

        let patch = ElementPatch::default().position(Point::new(50.0, 60.0));
        assert!(canvas.update_element_transient(id, &patch));
        assert_eq!(canvas.history().len(), 1);
        assert!(canvas.scene().hit_test(Point::new(240.0, 250.0)).is_some());
    }

    #[test]
    fn test_recolor_and_rotate() {
        let mut canvas = canvas();
        let id = canvas.import_image(&png_bytes(20, 10)).unwrap();
        assert!(canvas.rotate(id, 450.0));
        assert!(canvas.recolor(id, SerializableColor::white()));
        let Some(Element::Image(image)) = canvas.scene().get(id) else {
            panic!("expected image");
        };
        assert!((image.rotation - 90.0).abs() < 1e-9);
        assert_eq!(image.style.color, SerializableColor::white());
    }

    #[test]
    fn test_import_image_is_centered() {
        let mut canvas = canvas();
        let id = canvas.import_image(&png_bytes(2000, 1000)).unwrap();
        let Some(Element::Image(image)) = canvas.scene().get(id) else {
            panic!("expected image");
        };
        assert!((image.width - 800.0).abs() < 1e-9);
        assert!((image.height - 400.0).abs() < 1e-9);
        assert!((image.position.x - 100.0).abs() < 1e-9);
        assert!((image.position.y - 200.0).abs() < 1e-9);
        assert!(image.src.starts_with("data:image/png;base64,"));
        assert_eq!(canvas.history().len(), 1);
    }

    #[test]
    fn test_import_rejects_unsupported() {
        let mut canvas = canvas();
        assert!(matches!(
            canvas.import_image(b"not an image"),
            Err(ImportError::UnsupportedFormat)
        ));
        assert!(canvas.scene().is_empty());
        assert!(canvas.history().is_empty());
    }

    #[test]
    fn test_clear_scene() {
        let mut canvas = canvas();
        assert!(!canvas.clear_scene());
        canvas.set_tool(ToolKind::Rectangle);
        drag(&mut canvas, (0.0, 0.0), (10.0, 10.0));
        assert!(canvas.clear_scene());
        assert!(canvas.scene().is_empty());
        assert!(canvas.undo());
        assert_eq!(canvas.scene().len(), 1);
    }

    #[test]
    fn test_scene_changes_are_persisted() {
        let storage = Arc::new(MemoryStorage::new());
        let mut canvas = canvas_with(storage.clone());
        canvas.set_tool(ToolKind::Arrow);
        drag(&mut canvas, (0.0, 0.0), (50.0, 0.0));
        drop(canvas);

        let reopened = canvas_with(storage.clone());
        assert_eq!(reopened.scene().len(), 1);
        assert!(reopened.history().is_empty());
        assert!(storage.exists(PROJECTS_KEY).unwrap());
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Rectangle);
        drag(&mut canvas, (0.0, 0.0), (10.0, 10.0));
        let first = canvas.scene().last().unwrap().id();
        assert!(canvas.delete_element(first));
        drag(&mut canvas, (0.0, 0.0), (10.0, 10.0));
        assert!(canvas.scene().last().unwrap().id() > first);
    }

    #[test]
    fn test_project_switch_resets_history() {
        let mut canvas = canvas();
        let first = canvas.project().id.clone();
        canvas.set_tool(ToolKind::Rectangle);
        drag(&mut canvas, (0.0, 0.0), (10.0, 10.0));

        let second = canvas.create_project(Some("Second"));
        assert_eq!(canvas.project().id, second);
        assert!(canvas.scene().is_empty());
        assert!(canvas.history().is_empty());

        assert!(!canvas.switch_project("missing"));
        assert_eq!(canvas.project().id, second);

        assert!(canvas.switch_project(&first));
        assert_eq!(canvas.scene().len(), 1);
        assert!(!canvas.can_undo());
    }

    #[test]
    fn test_rename_and_delete_project() {
        let mut canvas = canvas();
        let first = canvas.project().id.clone();
        assert!(canvas.rename_project(&first, "Sketch"));
        assert_eq!(canvas.project().name, "Sketch");

        canvas.set_tool(ToolKind::Rectangle);
        drag(&mut canvas, (0.0, 0.0), (10.0, 10.0));
        let second = canvas.create_project(None);
        assert_eq!(canvas.project().name, "Untitled");

        assert!(canvas.delete_project(&second));
        assert_eq!(canvas.project().id, first);
        assert_eq!(canvas.scene().len(), 1);
        assert_eq!(canvas.projects().len(), 1);
        assert!(!canvas.delete_project("missing"));
    }

    #[test]
    fn test_set_tool_finishes_drawing() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Pen);
        canvas.handle_pointer(PointerEvent::down(0.0, 0.0));
        canvas.handle_pointer(PointerEvent::moved(3.0, 3.0));
        canvas.set_tool(ToolKind::Select);
        assert_eq!(canvas.action(), Action::None);
        assert_eq!(canvas.history().len(), 1);
    }

    #[test]
    fn test_stroke_writes_storage_once() {
        let storage = Arc::new(CountingStorage::default());
        let mut canvas = canvas_with(storage.clone());
        canvas.set_tool(ToolKind::Pen);
        let before = storage.saves();

        canvas.handle_pointer(PointerEvent::down(0.0, 0.0));
        for i in 1..=100 {
            canvas.handle_pointer(PointerEvent::moved(f64::from(i), 0.0));
        }
        assert_eq!(storage.saves(), before);
        canvas.handle_pointer(PointerEvent::up(100.0, 0.0));

        // Project list plus the active project key.
        assert_eq!(storage.saves(), before + 2);
        assert_eq!(saved_scene_len(storage), 1);
    }

    #[test]
    fn test_drag_erase_written_at_gesture_end() {
        let storage = Arc::new(CountingStorage::default());
        let mut canvas = canvas_with(storage.clone());
        canvas.set_tool(ToolKind::Rectangle);
        drag(&mut canvas, (0.0, 0.0), (10.0, 10.0));
        drag(&mut canvas, (100.0, 0.0), (110.0, 10.0));
        canvas.set_tool(ToolKind::Eraser);

        canvas.handle_pointer(PointerEvent::down(5.0, 5.0));
        let after_press = storage.saves();
        canvas.handle_pointer(PointerEvent::moved(105.0, 5.0));
        assert_eq!(storage.saves(), after_press);
        assert_eq!(saved_scene_len(storage.clone()), 1);

        canvas.handle_pointer(PointerEvent::up(105.0, 5.0));
        assert_eq!(saved_scene_len(storage), 0);
    }

    #[test]
    fn test_transient_update_written_on_flush() {
        let storage = Arc::new(CountingStorage::default());
        let mut canvas = canvas_with(storage.clone());
        canvas.set_tool(ToolKind::Note);
        canvas.handle_pointer(PointerEvent::down(0.0, 0.0));
        canvas.handle_pointer(PointerEvent::up(0.0, 0.0));
        let id = canvas.scene().last().unwrap().id();
        let before = storage.saves();

        let patch = ElementPatch::default().position(Point::new(40.0, 40.0));
        assert!(canvas.update_element_transient(id, &patch));
        assert_eq!(storage.saves(), before);
        assert!(canvas.flush());
        assert!(!canvas.flush());
        assert_eq!(storage.saves(), before + 2);
    }

    #[test]
    fn test_pen_tap_is_not_picked() {
        let mut canvas = canvas();
        canvas.set_tool(ToolKind::Pen);
        canvas.handle_pointer(PointerEvent::down(20.0, 20.0));
        canvas.handle_pointer(PointerEvent::up(20.0, 20.0));
        assert!(canvas.scene().hit_test(Point::new(23.0, 24.0)).is_none());

        canvas.set_tool(ToolKind::Eraser);
        assert_eq!(canvas.handle_pointer(PointerEvent::down(23.0, 24.0)), Effect::None);
        canvas.handle_pointer(PointerEvent::up(23.0, 24.0));
        assert_eq!(canvas.scene().len(), 1);
    }
}
