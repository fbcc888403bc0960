//! Stage - the loop/dispatcher
//!
//! Owns the host, the object registry and the pointer interaction sets.
//! One call to [`Stage::step`] is one loop iteration:
//!
//! 1. drain pending events from the host and dispatch each to its `Game` hook
//! 2. refresh the keyboard/pointer snapshot
//! 3. `on_mouse_stay` for every hovered object
//! 4. `Game::update`
//! 5. `GameObject::update` for every registered object
//!
//! Objects are visited in ascending id order in every phase.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use super::Game;
use crate::component::{GameObject, ObjectContext, ObjectId, Pending};
use crate::core::{
    Event, GameError, InputState, Key, KeyMods, MouseButtonEvent, MouseMoveEvent, PointerState,
    Result, WindowConfig,
};
use crate::host::{Host, WinitHost};

pub struct Stage<H: Host> {
    host: H,

    // registry, ascending id order
    objects: BTreeMap<ObjectId, Box<dyn GameObject<H>>>,
    // both always subsets of `objects`' keys
    hovered: BTreeSet<ObjectId>,
    pressed: BTreeSet<ObjectId>,

    input: InputState,
    events: Vec<Event>,
    // id counter plus spawn/destroy requests from object hooks,
    // applied after each dispatch step
    pending: Pending<H>,

    running: bool,
    frame: u64,
}

impl Stage<WinitHost> {
    /// Open a window and wrap it in a stage
    pub fn open(config: &WindowConfig) -> Result<Self> {
        Ok(Self::new(WinitHost::open(config)?))
    }
}

impl<H: Host> Stage<H> {
    pub fn new(host: H) -> Self {
        debug!(backend = host.backend_name(), "Stage created");
        Self {
            host,
            objects: BTreeMap::new(),
            hovered: BTreeSet::new(),
            pressed: BTreeSet::new(),
            input: InputState::new(),
            events: Vec::new(),
            pending: Pending::new(),
            running: true,
            frame: 0,
        }
    }

    // ========== registry ==========

    /// Register an object and return its id
    ///
    /// The id is also stored in the object's [`Body`](crate::component::Body).
    /// A previously destroyed object can be attached again and gets a new id.
    pub fn attach(&mut self, mut object: Box<dyn GameObject<H>>) -> ObjectId {
        let id = self.pending.allocate_id();

        object.body_mut().assign_id(id);
        self.objects.insert(id, object);

        crate::engine_debug!(%id, "Object attached");
        id
    }

    /// [`attach`](Self::attach) for an unboxed object
    pub fn spawn<T>(&mut self, object: T) -> ObjectId
    where
        T: GameObject<H> + 'static,
    {
        self.attach(Box::new(object))
    }

    /// Remove an object from the registry and from the hover and press sets
    ///
    /// Returns the object so the caller can erase whatever it drew. Its body
    /// is detached: no id, not hovered.
    pub fn destroy(&mut self, id: ObjectId) -> Result<Box<dyn GameObject<H>>> {
        let mut object = self.objects.remove(&id).ok_or(GameError::UnknownObject(id))?;
        self.hovered.remove(&id);
        self.pressed.remove(&id);
        object.body_mut().detach();

        crate::engine_debug!(%id, "Object destroyed");
        Ok(object)
    }

    pub fn object(&self, id: ObjectId) -> Option<&dyn GameObject<H>> {
        self.objects.get(&id).map(|object| &**object)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Box<dyn GameObject<H>>> {
        self.objects.get_mut(&id)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &dyn GameObject<H>)> {
        self.objects.iter().map(|(id, object)| (*id, &**object))
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn is_hovered(&self, id: ObjectId) -> bool {
        self.hovered.contains(&id)
    }

    pub fn is_pressed(&self, id: ObjectId) -> bool {
        self.pressed.contains(&id)
    }

    pub fn hovered(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.hovered.iter().copied()
    }

    pub fn pressed(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.pressed.iter().copied()
    }

    // ========== input snapshot ==========

    /// Whether `key` was held as of the last snapshot refresh
    pub fn key_is_down(&self, key: Key) -> bool {
        self.input.key_is_down(key)
    }

    pub fn modifiers(&self) -> KeyMods {
        self.input.modifiers()
    }

    pub fn pointer(&self) -> &PointerState {
        self.input.pointer()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    // ========== host ==========

    pub fn surface(&self) -> &H::Surface {
        self.host.surface()
    }

    pub fn surface_mut(&mut self) -> &mut H::Surface {
        self.host.surface_mut()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // ========== loop control ==========

    /// Ask the loop to stop
    ///
    /// `step` returns as soon as the current hook returns; `run` then returns
    /// `Ok(())`. Nothing is torn down, so the stage can be run again.
    pub fn stop(&mut self) {
        if self.running {
            debug!(frame = self.frame, "Stop requested");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Completed iterations
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Run until [`stop`](Self::stop) is called
    ///
    /// Any error returned by a hook ends the loop and is returned as is.
    pub fn run<G: Game<H>>(&mut self, game: &mut G) -> Result<()> {
        crate::engine_info!(
            backend = self.host.backend_name(),
            objects = self.objects.len(),
            "Entering main loop"
        );

        self.running = true;
        while self.running {
            self.step(game)?;
        }

        crate::engine_info!(frames = self.frame, "Main loop stopped");
        Ok(())
    }

    /// One loop iteration
    pub fn step<G: Game<H>>(&mut self, game: &mut G) -> Result<()> {
        let mut events = std::mem::take(&mut self.events);
        events.clear();
        self.host.poll_events(&mut events)?;

        for event in &events {
            self.dispatch(game, event)?;
            if !self.running {
                self.events = events;
                return Ok(());
            }
        }
        self.events = events;

        let keyboard = self.host.keyboard();
        let pointer = self.host.pointer();
        self.input.refresh(keyboard, pointer);

        let stay = self.input.pointer().to_move_event();
        for id in &self.hovered {
            if let Some(object) = self.objects.get_mut(id) {
                let mut ctx = ObjectContext::new(*id, &mut self.host, &self.input, &mut self.pending);
                object.on_mouse_stay(&mut ctx, &stay)?;
            }
        }
        self.flush_pending();

        game.update(self)?;
        self.flush_pending();
        if !self.running {
            return Ok(());
        }

        for (id, object) in self.objects.iter_mut() {
            let mut ctx = ObjectContext::new(*id, &mut self.host, &self.input, &mut self.pending);
            object.update(&mut ctx)?;
        }
        self.flush_pending();

        self.frame += 1;
        Ok(())
    }

    /// Route one event to its game hook
    pub fn dispatch<G: Game<H>>(&mut self, game: &mut G, event: &Event) -> Result<()> {
        trace!(event = %event.detail(), "Dispatching");

        match event {
            Event::Quit => game.on_quit(self)?,
            Event::Focus(e) => game.on_focus(self, e)?,
            Event::KeyDown(e) => game.on_key_down(self, e)?,
            Event::KeyUp(e) => game.on_key_up(self, e)?,
            Event::MouseMove(e) => game.on_mouse_move(self, e)?,
            Event::MouseUp(e) => game.on_mouse_up(self, e)?,
            Event::MouseDown(e) => game.on_mouse_down(self, e)?,
            Event::Resize(e) => game.on_resize(self, e)?,
        }

        self.flush_pending();
        Ok(())
    }

    // ========== pointer tracking ==========

    /// Default pointer-move handling
    ///
    /// Re-tests every object against `event.pos`: an object the pointer just
    /// entered joins the hover set and gets `on_mouse_enter`, one it just left
    /// leaves the set and gets `on_mouse_exit`. Then every pressed object gets
    /// `on_mouse_drag`, hovered or not.
    pub fn track_mouse_move(&mut self, event: &MouseMoveEvent) -> Result<()> {
        for (id, object) in self.objects.iter_mut() {
            let colliding = object.is_colliding_with(event.pos);
            let was_hovered = self.hovered.contains(id);

            if colliding && !was_hovered {
                self.hovered.insert(*id);
                object.body_mut().set_hovered(true);
                let mut ctx = ObjectContext::new(*id, &mut self.host, &self.input, &mut self.pending);
                object.on_mouse_enter(&mut ctx, event)?;
            } else if !colliding && was_hovered {
                self.hovered.remove(id);
                object.body_mut().set_hovered(false);
                let mut ctx = ObjectContext::new(*id, &mut self.host, &self.input, &mut self.pending);
                object.on_mouse_exit(&mut ctx, event)?;
            }
        }

        for id in &self.pressed {
            if let Some(object) = self.objects.get_mut(id) {
                let mut ctx = ObjectContext::new(*id, &mut self.host, &self.input, &mut self.pending);
                object.on_mouse_drag(&mut ctx, event)?;
            }
        }

        self.flush_pending();
        Ok(())
    }

    /// Default button-press handling (primary button only)
    ///
    /// Every hovered object gets `on_mouse_down`, then the hover set is merged
    /// into the press set. Objects already pressed stay pressed.
    pub fn track_mouse_down(&mut self, event: &MouseButtonEvent) -> Result<()> {
        if !event.button.is_primary() {
            return Ok(());
        }

        for id in &self.hovered {
            if let Some(object) = self.objects.get_mut(id) {
                let mut ctx = ObjectContext::new(*id, &mut self.host, &self.input, &mut self.pending);
                object.on_mouse_down(&mut ctx, event)?;
            }
        }
        self.pressed.extend(self.hovered.iter().copied());

        self.flush_pending();
        Ok(())
    }

    /// Default button-release handling (primary button only)
    ///
    /// Every pressed object gets `on_mouse_up`, wherever the pointer is now,
    /// then the press set is cleared.
    pub fn track_mouse_up(&mut self, event: &MouseButtonEvent) -> Result<()> {
        if !event.button.is_primary() {
            return Ok(());
        }

        for id in &self.pressed {
            if let Some(object) = self.objects.get_mut(id) {
                let mut ctx = ObjectContext::new(*id, &mut self.host, &self.input, &mut self.pending);
                object.on_mouse_up(&mut ctx, event)?;
            }
        }
        self.pressed.clear();

        self.flush_pending();
        Ok(())
    }

    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        for (id, object) in std::mem::take(&mut self.pending.spawned) {
            self.objects.insert(id, object);
            crate::engine_debug!(%id, "Object attached");
        }
        for id in std::mem::take(&mut self.pending.doomed) {
            if let Err(e) = self.destroy(id) {
                crate::engine_warn!(%id, error = %e, "Ignoring destroy request");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Body, Collidable};
    use crate::host::HeadlessHost;
    use crate::core::MouseButtons;
    use crate::math::{point, Offset, Point, Rect};

    struct Tile(Body);

    impl Collidable for Tile {
        fn is_colliding_with(&self, p: Point) -> bool {
            Rect::new(self.0.position(), 10, 10).contains(p)
        }
    }

    impl GameObject<HeadlessHost> for Tile {
        fn body(&self) -> &Body {
            &self.0
        }

        fn body_mut(&mut self) -> &mut Body {
            &mut self.0
        }
    }

    #[test]
    fn test_new_stage_is_empty() {
        let stage = Stage::new(HeadlessHost::new(10, 10));
        assert!(stage.is_empty());
        assert!(stage.is_running());
        assert_eq!(stage.frame(), 0);
        assert_eq!(stage.hovered().count(), 0);
    }

    #[test]
    fn test_attach_assigns_body_id() {
        let mut stage = Stage::new(HeadlessHost::new(10, 10));
        let id = stage.attach(Box::new(Tile(Body::new(point(0, 0)))));

        assert_eq!(id.raw(), 0);
        assert_eq!(stage.object(id).and_then(|o| o.id()), Some(id));
        assert_eq!(stage.objects().map(|(id, _)| id).collect::<Vec<_>>(), vec![id]);
    }

    #[test]
    fn test_hover_flag_mirrors_set() {
        let mut stage = Stage::new(HeadlessHost::new(100, 100));
        let id = stage.spawn(Tile(Body::new(point(0, 0))));

        let inside = MouseMoveEvent::new(point(5, 5), Offset::zeros(), MouseButtons::default());
        stage.track_mouse_move(&inside).unwrap();
        assert!(stage.is_hovered(id));
        assert!(stage.object(id).unwrap().body().is_hovered());

        let outside = MouseMoveEvent::new(point(50, 5), Offset::zeros(), MouseButtons::default());
        stage.track_mouse_move(&outside).unwrap();
        assert!(!stage.is_hovered(id));
        assert!(!stage.object(id).unwrap().body().is_hovered());
    }

    #[test]
    fn test_step_after_stop_keeps_stage() {
        let mut stage = Stage::new(HeadlessHost::new(10, 10));
        stage.host_mut().quit();
        stage.step(&mut ()).unwrap();
        assert!(!stage.is_running());

        // run resets the flag and drives the loop again
        stage.host_mut().quit();
        stage.run(&mut ()).unwrap();
        assert_eq!(stage.frame(), 0);
    }
}
