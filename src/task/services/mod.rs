//! Application services for the task board.

mod board;

pub use board::{
    CreateSubtaskRequest, CreateTaskRequest, TaskBoardError, TaskBoardResult, TaskBoardService,
};
