use crate::callable::Callable;
use crate::native_function::NativeFunction;
use crate::object::Object;
use std::time::{SystemTime, UNIX_EPOCH};

impl Object {
    pub fn make_clock_fn() -> Object {
        let native_fn = NativeFunction {
            name: "clock",
            arity: 0,
            on_call: |_| {
                let system_time = SystemTime::now();
                let elapsed = system_time.duration_since(UNIX_EPOCH).unwrap();
                Object::Number(elapsed.as_secs_f64())
            },
        };
        Object::Callable(Callable::Native(native_fn))
    }
}
