use rp2040_hal::sio::Spinlock;

/// Guards the queue from the key core to the display core.
/// Spinlock 31 is taken by the critical section implementation.
pub type CrossCoreMsgLock = Spinlock<0>;
