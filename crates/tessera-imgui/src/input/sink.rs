use std::time::Duration;

use super::DisplayInfo;

/// Where forwarded input goes. Implemented for `imgui::Io`.
pub trait InputSink {
    fn key_event(&mut self, key: imgui::Key, down: bool);
    fn mouse_pos(&mut self, pos: [f32; 2]);
    fn mouse_button(&mut self, button: imgui::MouseButton, down: bool);
    fn mouse_wheel(&mut self, delta: [f32; 2]);
    fn input_character(&mut self, ch: char);
    fn delta_time(&mut self, dt: Duration);
    fn display(&mut self, info: DisplayInfo);
}

impl InputSink for imgui::Io {
    fn key_event(&mut self, key: imgui::Key, down: bool) {
        self.add_key_event(key, down);
    }

    fn mouse_pos(&mut self, pos: [f32; 2]) {
        self.add_mouse_pos_event(pos);
    }

    fn mouse_button(&mut self, button: imgui::MouseButton, down: bool) {
        self.add_mouse_button_event(button, down);
    }

    fn mouse_wheel(&mut self, delta: [f32; 2]) {
        self.add_mouse_wheel_event(delta);
    }

    fn input_character(&mut self, ch: char) {
        self.add_input_character(ch);
    }

    fn delta_time(&mut self, dt: Duration) {
        self.update_delta_time(dt);
    }

    fn display(&mut self, info: DisplayInfo) {
        self.display_size = info.size;
        self.display_framebuffer_scale = [info.framebuffer_scale; 2];
    }
}
