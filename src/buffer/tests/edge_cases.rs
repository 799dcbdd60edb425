//! Tests for boundary conditions and unusual call patterns

#[cfg(test)]
mod tests {
    use crate::buffer::api::{BoundedBuffer, BufferError, PutResult, WakeOrder};
    use serial_test::serial;
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    fn wait_until(cond: impl Fn() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !cond() {
            assert!(Instant::now() < deadline, "condition not reached in time");
            thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn test_capacity_one_ping_pong() {
        let buffer = BoundedBuffer::new(1).unwrap();

        for i in 0..100 {
            buffer.put(i).unwrap();
            assert!(buffer.is_full().unwrap());
            assert_eq!(buffer.take().unwrap(), i);
            assert!(buffer.is_empty().unwrap());
        }
    }

    #[test]
    fn test_zero_capacity_rejected_in_both_modes() {
        assert!(matches!(
            BoundedBuffer::<i32>::new(0),
            Err(BufferError::InvalidCapacity { capacity: 0 })
        ));
        assert!(matches!(
            BoundedBuffer::<i32>::with_wake_order(0, WakeOrder::Fifo),
            Err(BufferError::InvalidCapacity { capacity: 0 })
        ));
    }

    #[test]
    #[serial]
    fn test_try_put_returns_within_timeout_bound() {
        let buffer = BoundedBuffer::new(1).unwrap();
        buffer.put(0).unwrap();

        let start = Instant::now();
        match buffer.try_put(1, Duration::from_millis(50)).unwrap() {
            PutResult::TimedOut(item) => assert_eq!(item, 1),
            PutResult::Accepted => panic!("buffer was full"),
        }
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(50));
        // Timeout plus lock-reacquisition slack, not multiples of it.
        assert!(elapsed < Duration::from_secs(2));
    }

    #[test]
    #[serial]
    fn test_timed_put_succeeds_when_space_appears() {
        let buffer = Arc::new(BoundedBuffer::new(1).unwrap());
        buffer.put("old").unwrap();

        let timed = {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || buffer.try_put("new", Duration::from_secs(10)).unwrap())
        };

        wait_until(|| buffer.stats().unwrap().waiting_producers == 1);
        assert_eq!(buffer.take().unwrap(), "old");

        assert!(timed.join().unwrap().is_accepted());
        assert_eq!(buffer.take().unwrap(), "new");
    }

    #[test]
    #[serial]
    fn test_timed_take_succeeds_when_item_appears() {
        let buffer = Arc::new(BoundedBuffer::new(4).unwrap());

        let timed = {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || buffer.try_take(Duration::from_secs(10)).unwrap())
        };

        wait_until(|| buffer.stats().unwrap().waiting_consumers == 1);
        buffer.put(42).unwrap();

        assert_eq!(timed.join().unwrap(), Some(42));
    }

    #[test]
    #[serial]
    fn test_waiting_counts_track_blocked_threads() {
        let buffer = Arc::new(BoundedBuffer::<i32>::new(2).unwrap());

        let blocked = {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || buffer.take().unwrap())
        };

        wait_until(|| buffer.stats().unwrap().waiting_consumers == 1);
        buffer.put(7).unwrap();
        assert_eq!(blocked.join().unwrap(), 7);
        assert_eq!(buffer.stats().unwrap().waiting_consumers, 0);
    }

    #[test]
    fn test_buffer_transports_owned_values() {
        // Ownership hand-off: non-Copy values move through untouched.
        let buffer = BoundedBuffer::new(2).unwrap();
        buffer.put(vec![1, 2, 3]).unwrap();
        buffer.put(Vec::new()).unwrap();

        assert_eq!(buffer.take().unwrap(), vec![1, 2, 3]);
        assert_eq!(buffer.take().unwrap(), Vec::<i32>::new());
    }
}
