mod health_api;
mod test_util;
mod todo_api;
