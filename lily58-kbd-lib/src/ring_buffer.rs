use core::mem::MaybeUninit;

/// Fixed capacity FIFO, used for outbound HID reports and cross-core messages.
///
/// Values still in the buffer when it's dropped are not dropped, only use this
/// for types that don't need it.
pub struct RingBuffer<T, const N: usize> {
    ring: [MaybeUninit<T>; N],
    start: usize,
    filled: usize,
}

impl<const N: usize, T> RingBuffer<T, N> {
    const EMPTY: MaybeUninit<T> = MaybeUninit::uninit();

    /// # Panics
    /// [`RingBuffer`] size too small
    #[must_use]
    pub const fn new() -> Self {
        assert!(N > 1, "A ring-buffer of 1 makes no sense");
        Self {
            ring: [Self::EMPTY; N],
            start: 0,
            filled: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.filled
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    #[inline]
    fn has_slot(&self) -> bool {
        self.filled < N
    }

    pub fn try_push(&mut self, val: T) -> bool {
        if !self.has_slot() {
            return false;
        }
        let mut offset = self.start + self.filled;
        if offset > N - 1 {
            offset -= N;
        }
        self.ring[offset].write(val);
        self.filled += 1;
        true
    }

    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        if self.filled == 0 {
            return None;
        }
        // Safety: Slots from start through start + filled are initialized
        unsafe { Some(self.ring[self.start].assume_init_ref()) }
    }

    pub fn try_pop(&mut self) -> Option<T> {
        if self.filled == 0 {
            return None;
        }
        // Safety: Same as peek, the slot is abandoned after the read
        let res = unsafe { Some(self.ring[self.start].as_ptr().read()) };
        if self.start >= N - 1 {
            self.start = 0;
        } else {
            self.start += 1;
        }
        self.filled -= 1;
        res
    }
}

#[cfg(test)]
mod tests {
    use crate::ring_buffer::RingBuffer;

    #[test]
    fn can_push_pop() {
        let mut rb: RingBuffer<i32, 16> = RingBuffer::new();
        assert!(rb.try_pop().is_none());
        assert!(rb.peek().is_none());
        assert!(rb.try_push(0));
        assert_eq!(Some(&0), rb.peek());
        assert_eq!(1, rb.len());
        assert_eq!(Some(0), rb.try_pop());
        assert!(rb.try_pop().is_none());
        assert!(rb.is_empty());
    }

    #[test]
    fn rejects_when_full() {
        let mut rb: RingBuffer<u8, 4> = RingBuffer::new();
        for i in 0..4 {
            assert!(rb.try_push(i));
        }
        assert!(!rb.try_push(4));
        assert_eq!(Some(0), rb.try_pop());
        assert!(rb.try_push(4));
        for i in 1..5 {
            assert_eq!(Some(i), rb.try_pop());
        }
        assert!(rb.try_pop().is_none());
    }

    #[test]
    fn can_wrap() {
        let mut rb: RingBuffer<i32, 8> = RingBuffer::new();
        for i in 0..256 {
            assert!(rb.try_push(i));
            assert_eq!(Some(&i), rb.peek());
            assert_eq!(Some(i), rb.try_pop());
        }
        assert!(rb.try_pop().is_none());
    }

    #[test]
    fn wrap_chunks() {
        let mut rb: RingBuffer<u8, 128> = RingBuffer::new();
        for i in 0..128 {
            for j in 0..i {
                assert!(rb.try_push(j));
            }
            assert_eq!(usize::from(i), rb.len());
            for j in 0..i {
                assert_eq!(Some(j), rb.try_pop());
            }
            assert!(rb.try_pop().is_none());
        }
    }
}
