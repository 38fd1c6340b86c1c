//! Enumerations for TUI state management.

/// Which view fills the main panel.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    AddTask,
    TaskList,
    Categories,
    Help,
}

/// Which pane receives key input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    Sidebar,
    Main,
}

/// Entries of the navigation sidebar.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SidebarItem {
    AddTask,
    ViewTasks,
    Categories,
    Help,
}

impl SidebarItem {
    pub const ALL: [SidebarItem; 4] = [
        SidebarItem::AddTask,
        SidebarItem::ViewTasks,
        SidebarItem::Categories,
        SidebarItem::Help,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SidebarItem::AddTask => "Add New Task",
            SidebarItem::ViewTasks => "View All Tasks",
            SidebarItem::Categories => "Task Categories",
            SidebarItem::Help => "Help",
        }
    }

    /// The view this entry navigates to.
    pub fn target(self) -> AppState {
        match self {
            SidebarItem::AddTask => AppState::AddTask,
            SidebarItem::ViewTasks => AppState::TaskList,
            SidebarItem::Categories => AppState::Categories,
            SidebarItem::Help => AppState::Help,
        }
    }
}
