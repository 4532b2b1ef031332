mod board;
mod project_form;
mod project_table;
mod task_form;
mod task_table;

pub use board::Planboard;
pub use project_form::ProjectFormController;
pub use project_table::ProjectTableController;
pub use task_form::TaskFormController;
pub use task_table::TaskTableController;
