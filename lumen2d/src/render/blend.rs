use std::ops::{Deref, DerefMut};

use super::surface::{BlendMode, DrawSurface};

/// Scoped blend-mode change.
///
/// The guard switches the surface to a mode on creation and puts the restore
/// mode back when dropped, including on early return. Draw through the guard
/// (it derefs to the surface).
pub struct BlendGuard<'s, S: DrawSurface + ?Sized> {
    surface: &'s mut S,
    restore: BlendMode,
}

impl<'s, S: DrawSurface + ?Sized> BlendGuard<'s, S> {
    /// Switch to `mode`; the previous mode comes back on drop.
    pub fn new(surface: &'s mut S, mode: BlendMode) -> Self {
        let restore = surface.blend_mode();
        surface.set_blend_mode(mode);
        Self { surface, restore }
    }

    /// Frame-level guard: forces `Normal` now and again on drop, whatever the
    /// surface was left in by the host or by a failing layer.
    pub fn frame(surface: &'s mut S) -> Self {
        surface.set_blend_mode(BlendMode::Normal);
        Self {
            surface,
            restore: BlendMode::Normal,
        }
    }

    /// Mode that will be restored when this guard drops.
    pub fn restore_mode(&self) -> BlendMode {
        self.restore
    }
}

impl<S: DrawSurface + ?Sized> Deref for BlendGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> DerefMut for BlendGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> Drop for BlendGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.set_blend_mode(self.restore);
    }
}
