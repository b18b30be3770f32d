use crate::geometry::camera::{Axis, Motion, Sign};

/// 按键到相机运动的映射
///
/// 平移：a/d 沿 ∓i，e/q 沿 ∓j，s/w 沿 ∓k。
/// 旋转：k/i 绕 ∓i，j/l 绕 ∓j，u/o 绕 ∓k。
pub fn motion_for_key(key: char) -> Option<Motion> {
    use Axis::{I, J, K};
    use Sign::{Negative, Positive};

    let motion = match key.to_ascii_lowercase() {
        'a' => Motion::translate(I, Negative),
        'd' => Motion::translate(I, Positive),
        'e' => Motion::translate(J, Negative),
        'q' => Motion::translate(J, Positive),
        's' => Motion::translate(K, Negative),
        'w' => Motion::translate(K, Positive),
        'k' => Motion::rotate(I, Negative),
        'i' => Motion::rotate(I, Positive),
        'j' => Motion::rotate(J, Negative),
        'l' => Motion::rotate(J, Positive),
        'u' => Motion::rotate(K, Negative),
        'o' => Motion::rotate(K, Positive),
        _ => return None,
    };
    Some(motion)
}

/// 当前按住的按键，按按下顺序保存
///
/// 由宿主（窗口事件、脚本）显式驱动，每帧通过 [`InputState::motions`]
/// 转换为运动列表交给 `Camera::update`。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    held: Vec<char>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: char) {
        if !self.held.contains(&key) {
            self.held.push(key);
        }
    }

    pub fn release(&mut self, key: char) {
        self.held.retain(|&k| k != key);
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// 用 `keys` 替换当前状态，字符从左到右依次按下
    pub fn hold_exactly(&mut self, keys: &str) {
        self.release_all();
        for key in keys.chars() {
            self.press(key);
        }
    }

    pub fn held(&self) -> &[char] {
        &self.held
    }

    /// 每个 (类型, 轴) 至多一个运动；冲突时最后按下的键生效，结果保持按下顺序
    pub fn motions(&self) -> Vec<Motion> {
        let mut motions: Vec<Motion> = Vec::new();
        for motion in self.held.iter().rev().filter_map(|&k| motion_for_key(k)) {
            let taken = motions
                .iter()
                .any(|m| m.kind == motion.kind && m.axis == motion.axis);
            if !taken {
                motions.push(motion);
            }
        }
        motions.reverse();
        motions
    }
}
