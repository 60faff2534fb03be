use crate::OutlineError;

pub(crate) struct ArgumentsStack<'a> {
    pub(crate) data: &'a mut [f32],
    pub(crate) len: usize,
    pub(crate) max_len: usize,
}

impl<'a> ArgumentsStack<'a> {
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub(crate) fn push(&mut self, n: f32) -> Result<(), OutlineError> {
        if self.len == self.max_len {
            Err(OutlineError::ArgumentsStackLimitReached)
        } else {
            self.data[self.len] = n;
            self.len += 1;
            Ok(())
        }
    }

    #[inline]
    pub(crate) fn at(&self, index: usize) -> f32 {
        self.data[index]
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> f32 {
        debug_assert!(!self.is_empty());
        self.len -= 1;
        self.data[self.len]
    }

    #[inline]
    pub(crate) fn reverse(&mut self) {
        if self.is_empty() {
            return;
        }

        // Reverse only the actual data and not the whole stack.
        let (first, _) = self.data.split_at_mut(self.len);
        first.reverse();
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub(crate) fn remove_last_n(&mut self, n: usize) {
        debug_assert!(n <= self.len);
        self.len -= n;
    }
}

impl core::fmt::Debug for ArgumentsStack<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(&self.data[..self.len]).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_pop() {
        let mut stack = ArgumentsStack {
            data: &mut [0.0; 2],
            len: 0,
            max_len: 2,
        };

        stack.push(1.0).unwrap();
        stack.push(2.0).unwrap();
        assert_eq!(stack.push(3.0), Err(OutlineError::ArgumentsStackLimitReached));
        assert_eq!(stack.pop(), 2.0);
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn reverse_only_touches_used_values() {
        let mut stack = ArgumentsStack {
            data: &mut [0.0; 4],
            len: 0,
            max_len: 4,
        };

        stack.push(1.0).unwrap();
        stack.push(2.0).unwrap();
        stack.push(3.0).unwrap();
        stack.reverse();
        assert_eq!(stack.at(0), 3.0);
        assert_eq!(stack.at(2), 1.0);
        assert_eq!(stack.data[3], 0.0);
    }

    #[test]
    fn remove_last_n() {
        let mut stack = ArgumentsStack {
            data: &mut [0.0; 4],
            len: 0,
            max_len: 4,
        };

        for n in [1.0, 2.0, 3.0, 4.0] {
            stack.push(n).unwrap();
        }

        stack.remove_last_n(3);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.pop(), 1.0);
        assert!(stack.is_empty());
    }
}
