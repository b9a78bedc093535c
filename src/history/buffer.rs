use chrono::{DateTime, Local};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint<T> {
    pub value: T,
    pub timestamp: DateTime<Local>,
}

impl<T> DataPoint<T> {
    pub fn new(value: T, timestamp: DateTime<Local>) -> Self {
        Self { value, timestamp }
    }
}

#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    data: VecDeque<DataPoint<T>>,
    capacity: usize,
}

impl<T: Clone> CircularBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, value: T, timestamp: DateTime<Local>) {
        while self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(DataPoint::new(value, timestamp));
    }

    pub fn get_values(&self) -> Vec<T> {
        self.data.iter().map(|dp| dp.value.clone()).collect()
    }

    pub fn get_latest(&self) -> Option<&T> {
        self.data.back().map(|dp| &dp.value)
    }

    pub fn get_oldest(&self) -> Option<&T> {
        self.data.front().map(|dp| &dp.value)
    }

    pub fn get_all(&self) -> &VecDeque<DataPoint<T>> {
        &self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter().map(|dp| &dp.value)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}
