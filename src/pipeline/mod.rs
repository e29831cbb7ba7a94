pub mod annotate;
pub mod image;
pub mod video;

use std::sync::{Mutex, MutexGuard};

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, Box<dyn std::error::Error + Send + Sync>> {
    mutex.lock().map_err(|_| "device lock poisoned".into())
}
