/// 隐藏手机号码中间4位
///
/// 长度不是 11 位数字时原样返回
pub fn mask_phone(phone: &str) -> String {
    let is_plain_number = phone.len() == 11 && phone.chars().all(|c| c.is_ascii_digit());
    if !is_plain_number {
        return phone.to_string();
    }
    format!("{}****{}", &phone[..3], &phone[7..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_middle_four_digits() {
        assert_eq!(mask_phone("13812345678"), "138****5678");
        assert_eq!(mask_phone("13800000000"), "138****0000");
    }

    #[test]
    fn non_eleven_digit_values_unchanged() {
        assert_eq!(mask_phone(""), "");
        assert_eq!(mask_phone("123"), "123");
        assert_eq!(mask_phone("123456789012"), "123456789012");
        assert_eq!(mask_phone("1381234567a"), "1381234567a");
    }
}
