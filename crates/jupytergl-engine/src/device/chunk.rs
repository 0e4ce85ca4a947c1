use core::ops::{Deref, DerefMut};

use super::GlContext;

/// Scoped GL batch.
///
/// Calls made through the guard are grouped into one flush unit. The batch is
/// closed when the guard is dropped, including when a call inside it fails and
/// `?` leaves the scope early. There is no rollback: calls already issued stay
/// issued.
///
/// Use [`Chunk::finish`] to close the batch and observe the flush result; a
/// flush error on implicit drop can only be logged.
pub struct Chunk<'a, C: GlContext + ?Sized> {
    ctx: &'a mut C,
    open: bool,
}

impl<'a, C: GlContext + ?Sized> Chunk<'a, C> {
    pub fn begin(ctx: &'a mut C) -> Self {
        ctx.begin_chunk();
        Self { ctx, open: true }
    }

    /// Closes the batch and returns the flush result.
    pub fn finish(mut self) -> Result<(), C::Error> {
        self.open = false;
        self.ctx.end_chunk()
    }
}

impl<C: GlContext + ?Sized> Deref for Chunk<'_, C> {
    type Target = C;
    fn deref(&self) -> &C {
        self.ctx
    }
}

impl<C: GlContext + ?Sized> DerefMut for Chunk<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.ctx
    }
}

impl<C: GlContext + ?Sized> Drop for Chunk<'_, C> {
    fn drop(&mut self) {
        if self.open {
            if let Err(err) = self.ctx.end_chunk() {
                log::warn!("gl chunk flush failed on scope exit: {err}");
            }
        }
    }
}
