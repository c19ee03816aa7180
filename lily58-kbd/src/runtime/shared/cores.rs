use crate::runtime::locks::CrossCoreMsgLock;
use core::cell::UnsafeCell;
#[cfg(feature = "left")]
use lily58_kbd_lib::report::Status;
use lily58_kbd_lib::ring_buffer::RingBuffer;

#[derive(Debug, Copy, Clone)]
pub enum KeycoreToAdminMessage {
    // Any key or encoder activity, keeps the display awake
    Touch,
    // Something the status screen shows changed
    #[cfg(feature = "left")]
    Status(Status),
    // The usb device couldn't be built, nothing will reach the host
    #[cfg(feature = "left")]
    UsbFailure,
}

struct SharedQueue(UnsafeCell<RingBuffer<KeycoreToAdminMessage, 16>>);

// Safety: Only accessed while holding `CrossCoreMsgLock`
unsafe impl Sync for SharedQueue {}

static SHARED_KEY_CORE_TO_ADMIN: SharedQueue = SharedQueue(UnsafeCell::new(RingBuffer::new()));

#[inline]
fn with_queue<R>(f: impl FnOnce(&mut RingBuffer<KeycoreToAdminMessage, 16>) -> R) -> R {
    let _guard = CrossCoreMsgLock::claim();
    // Safety: Exclusive access through lock
    f(unsafe { &mut *SHARED_KEY_CORE_TO_ADMIN.0.get() })
}

/// Doesn't wait for the lock, a missed touch is made up by the next one
pub fn push_touch_to_admin() -> bool {
    let Some(_guard) = CrossCoreMsgLock::try_claim() else {
        return false;
    };
    // Safety: Exclusive access through lock
    unsafe { (*SHARED_KEY_CORE_TO_ADMIN.0.get()).try_push(KeycoreToAdminMessage::Touch) }
}

#[cfg(feature = "left")]
pub fn push_status_change(status: Status) -> bool {
    with_queue(|queue| queue.try_push(KeycoreToAdminMessage::Status(status)))
}

#[cfg(feature = "left")]
pub fn push_usb_failure() -> bool {
    with_queue(|queue| queue.try_push(KeycoreToAdminMessage::UsbFailure))
}

pub fn pop_message() -> Option<KeycoreToAdminMessage> {
    with_queue(RingBuffer::try_pop)
}
