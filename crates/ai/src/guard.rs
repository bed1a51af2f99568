use engine::Move;

use crate::error::SearchError;
use crate::rules::RulesEngine;

/// A made move that is unmade when the guard goes out of scope.
///
/// The normal path calls [`MoveGuard::release`], which unmakes and reports
/// failures. If a deeper frame returns early with `?`, `Drop` unmakes instead,
/// so every enclosing frame restores its move on the way out.
pub(crate) struct MoveGuard<'a, P: RulesEngine> {
    position: &'a mut P,
    mv: Move,
    key_before: u64,
    verify: bool,
    released: bool,
}

impl<'a, P: RulesEngine> MoveGuard<'a, P> {
    pub(crate) fn make(position: &'a mut P, mv: Move, verify: bool) -> Result<Self, SearchError> {
        let key_before = if verify { position.position_key() } else { 0 };
        position.make_move(mv)?;
        Ok(Self {
            position,
            mv,
            key_before,
            verify,
            released: false,
        })
    }

    pub(crate) fn position(&mut self) -> &mut P {
        &mut *self.position
    }

    pub(crate) fn release(mut self) -> Result<(), SearchError> {
        self.released = true;
        self.position.unmake_move()?;

        if self.verify {
            let after = self.position.position_key();
            if after != self.key_before {
                return Err(SearchError::Desync {
                    mv: self.mv.to_string(),
                    before: self.key_before,
                    after,
                });
            }
        }

        Ok(())
    }
}

impl<P: RulesEngine> Drop for MoveGuard<'_, P> {
    fn drop(&mut self) {
        if !self.released {
            // Already unwinding an error; a failed unmake has nowhere better to go
            let _ = self.position.unmake_move();
        }
    }
}
