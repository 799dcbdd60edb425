//! Tests for FIFO-fair wakeup ordering

#[cfg(test)]
mod tests {
    use crate::buffer::api::{BoundedBuffer, BufferError, WakeOrder};
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
    fn test_wake_order_is_recorded() {
        let barging = BoundedBuffer::<i32>::new(2).unwrap();
        assert_eq!(barging.wake_order(), WakeOrder::Barging);

        let fair = BoundedBuffer::<i32>::with_wake_order(2, WakeOrder::Fifo).unwrap();
        assert_eq!(fair.wake_order(), WakeOrder::Fifo);
    }

    #[test]
    #[serial]
    fn test_fair_mode_serves_producers_in_arrival_order() {
        let buffer = Arc::new(BoundedBuffer::with_wake_order(1, WakeOrder::Fifo).unwrap());
        buffer.put(0).unwrap();

        // Spawn producers one at a time so their arrival order in the wait
        // line is known: each is blocked before the next starts.
        let mut producers = Vec::new();
        for i in 1..=3 {
            let handle = {
                let buffer = Arc::clone(&buffer);
                thread::spawn(move || buffer.put(i).unwrap())
            };
            wait_until(|| buffer.stats().unwrap().waiting_producers == i as usize);
            producers.push(handle);
        }

        // Slots open one at a time; the line must advance in arrival order.
        for expected in 0..=3 {
            assert_eq!(buffer.take().unwrap(), expected);
        }
        for producer in producers {
            producer.join().unwrap();
        }
    }

    #[test]
    #[serial]
    fn test_fair_mode_serves_consumers_in_arrival_order() {
        let buffer = Arc::new(BoundedBuffer::with_wake_order(4, WakeOrder::Fifo).unwrap());

        let mut consumers = Vec::new();
        for i in 0..3 {
            let handle = {
                let buffer = Arc::clone(&buffer);
                thread::spawn(move || buffer.take().unwrap())
            };
            wait_until(|| buffer.stats().unwrap().waiting_consumers == i + 1);
            consumers.push(handle);
        }

        buffer.put(10).unwrap();
        buffer.put(20).unwrap();
        buffer.put(30).unwrap();

        // The i-th arrived consumer receives the i-th item.
        let values: Vec<i32> = consumers
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();
        assert_eq!(values, vec![10, 20, 30]);
    }

    #[test]
    #[serial]
    fn test_fair_mode_line_advances_past_timed_out_waiter() {
        let buffer = Arc::new(BoundedBuffer::with_wake_order(1, WakeOrder::Fifo).unwrap());
        buffer.put("resident").unwrap();

        // First in line gives up quickly; second waits patiently.
        let quitter = {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || buffer.try_put("quitter", Duration::from_millis(50)).unwrap())
        };
        wait_until(|| buffer.stats().unwrap().waiting_producers == 1);

        let patient = {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || buffer.put("patient").unwrap())
        };
        wait_until(|| buffer.stats().unwrap().waiting_producers == 2);

        // Let the quitter time out while the buffer stays full.
        assert!(!quitter.join().unwrap().is_accepted());

        // The line advanced: the patient producer gets the next slot.
        assert_eq!(buffer.take().unwrap(), "resident");
        patient.join().unwrap();
        assert_eq!(buffer.take().unwrap(), "patient");
    }

    #[test]
    #[serial]
    fn test_fair_mode_interrupt_clears_the_line() {
        let buffer = Arc::new(BoundedBuffer::with_wake_order(1, WakeOrder::Fifo).unwrap());
        buffer.put(0).unwrap();

        let waiters: Vec<_> = (1..=3)
            .map(|i| {
                let buffer = Arc::clone(&buffer);
                thread::spawn(move || buffer.put(i))
            })
            .collect();
        wait_until(|| buffer.stats().unwrap().waiting_producers == 3);

        buffer.interrupt().unwrap();
        for waiter in waiters {
            assert!(matches!(
                waiter.join().unwrap(),
                Err(BufferError::Interrupted)
            ));
        }

        // Lines are empty again; the buffer works after acknowledgement.
        buffer.clear_interrupt().unwrap();
        assert_eq!(buffer.take().unwrap(), 0);
        buffer.put(99).unwrap();
        assert_eq!(buffer.take().unwrap(), 99);
    }
}
