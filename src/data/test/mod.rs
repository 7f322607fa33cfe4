mod audit;
mod guild_settings;
mod role_panel;
mod role_panel_item;
